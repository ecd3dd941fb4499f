//! Fixture locations and transform parameters.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::transform::{Compose, Interpolation, Normalize, Resize, IMAGENET_MEAN, IMAGENET_STD};

/// Directory holding the sample image and its dumps.
pub const SAMPLES_DIR: &str = "tests/samples";

/// Input image read by both dumpers.
pub const DEFAULT_INPUT: &str = "tests/samples/fingerprint_image.bmp";

/// Target edge length of the resize stages.
pub const DEFAULT_SIZE: usize = 224;

/// The three transform configurations dumped by the transform dumper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resize only, u8 output.
    Resized,
    /// Normalize only, original size, f32 output.
    Normalized,
    /// Resize then normalize, f32 output.
    ResizedAndNormalized,
}

impl Stage {
    pub const ALL: [Self; 3] = [Self::Resized, Self::Normalized, Self::ResizedAndNormalized];

    /// File name of this stage's dump.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Resized => "resized_image_reference.bin",
            Self::Normalized => "normalized_image_reference.bin",
            Self::ResizedAndNormalized => "resized_and_normalized_image_reference.bin",
        }
    }

    /// Human-readable label used in the shape report.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resized => "Resized image",
            Self::Normalized => "Normalized image",
            Self::ResizedAndNormalized => "Resized and normalized image",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output paths of the four dumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePaths {
    pub reference: PathBuf,
    pub resized: PathBuf,
    pub normalized: PathBuf,
    pub resized_and_normalized: PathBuf,
}

/// File name of the raw decoded pixel dump.
pub const REFERENCE_FILE_NAME: &str = "bmp_reference.bin";

/// Raw decoded pixel dump under [`SAMPLES_DIR`].
pub const DEFAULT_REFERENCE: &str = "tests/samples/bmp_reference.bin";

impl Default for FixturePaths {
    fn default() -> Self {
        Self::in_dir(SAMPLES_DIR)
    }
}

impl FixturePaths {
    /// Place the standard file names under `dir`.
    #[must_use]
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            reference: dir.join(REFERENCE_FILE_NAME),
            resized: dir.join(Stage::Resized.file_name()),
            normalized: dir.join(Stage::Normalized.file_name()),
            resized_and_normalized: dir.join(Stage::ResizedAndNormalized.file_name()),
        }
    }

    #[must_use]
    pub fn for_stage(&self, stage: Stage) -> &Path {
        match stage {
            Stage::Resized => &self.resized,
            Stage::Normalized => &self.normalized,
            Stage::ResizedAndNormalized => &self.resized_and_normalized,
        }
    }
}

/// Parameters of the transform dumper.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    /// Resize target height.
    pub height: usize,

    /// Resize target width.
    pub width: usize,

    /// Resize sampling strategy.
    pub interpolation: Interpolation,

    /// Per-channel means, scaled by `max_pixel_value` before subtraction.
    pub mean: Vec<f32>,

    /// Per-channel standard deviations, scaled by `max_pixel_value`.
    pub std: Vec<f32>,

    pub max_pixel_value: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_SIZE,
            width: DEFAULT_SIZE,
            interpolation: Interpolation::Linear,
            mean: IMAGENET_MEAN.to_vec(),
            std: IMAGENET_STD.to_vec(),
            max_pixel_value: 255.0,
        }
    }
}

impl TransformConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::InvalidParameter {
                name: "size".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        self.normalize().validate()
    }

    #[must_use]
    pub fn resize(&self) -> Resize {
        Resize::new(self.height, self.width).with_interpolation(self.interpolation)
    }

    #[must_use]
    pub fn normalize(&self) -> Normalize {
        Normalize::new(self.mean.clone(), self.std.clone(), self.max_pixel_value)
    }

    /// The transform sequence for one stage.
    #[must_use]
    pub fn compose(&self, stage: Stage) -> Compose {
        match stage {
            Stage::Resized => Compose::new(vec![self.resize().into()]),
            Stage::Normalized => Compose::new(vec![self.normalize().into()]),
            Stage::ResizedAndNormalized => {
                Compose::new(vec![self.resize().into(), self.normalize().into()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = FixturePaths::default();

        assert_eq!(paths.reference, Path::new(DEFAULT_REFERENCE));
        assert_eq!(paths.reference, Path::new(SAMPLES_DIR).join(REFERENCE_FILE_NAME));
        assert_eq!(
            paths.for_stage(Stage::ResizedAndNormalized),
            Path::new("tests/samples/resized_and_normalized_image_reference.bin")
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = TransformConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.height, config.width), (224, 224));
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = TransformConfig {
            width: 0,
            ..TransformConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn test_stage_composition() {
        let config = TransformConfig::default();

        assert_eq!(config.compose(Stage::Resized).steps().len(), 1);
        assert_eq!(config.compose(Stage::Normalized).steps()[0].name(), "normalize");
        let names: Vec<_> = config
            .compose(Stage::ResizedAndNormalized)
            .steps()
            .iter()
            .map(crate::transform::Step::name)
            .collect();
        assert_eq!(names, ["resize", "normalize"]);
    }
}
