//! Transform dumper: resize, normalize and both, each from the original image.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::image::{self, ElementType, ImageArray};
use crate::transform::{shape_display, Buffer};

use super::config::{FixturePaths, Stage, TransformConfig};

/// What one stage of the transform dumper wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    pub stage: Stage,
    pub path: PathBuf,
    /// Output shape as (height, width, channels).
    pub shape: (usize, usize, usize),
    pub element_type: ElementType,
    pub bytes: usize,
}

impl fmt::Display for DumpReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shape: {}", self.stage, shape_display(self.shape))
    }
}

/// Apply every stage to `image` independently.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a stage fails.
pub fn run_stages(image: &ImageArray, config: &TransformConfig) -> Result<Vec<(Stage, Buffer)>> {
    config.validate()?;

    Stage::ALL
        .iter()
        .map(|&stage| {
            tracing::info!("Running stage: {stage}");
            config.compose(stage).apply(image).map(|buffer| (stage, buffer))
        })
        .collect()
}

/// Load `input` as RGB, run all three stages, and write each output to its path.
///
/// # Errors
///
/// Returns an error if loading, transforming or writing fails.
pub fn dump_transforms<P: AsRef<Path>>(
    input: P,
    paths: &FixturePaths,
    config: &TransformConfig,
) -> Result<Vec<DumpReport>> {
    let input = input.as_ref();

    tracing::info!("Loading image for transforms: {}", input.display());
    let image = image::load_rgb_array(input)?;

    let mut reports = Vec::with_capacity(Stage::ALL.len());
    for (stage, buffer) in run_stages(&image, config)? {
        let path = paths.for_stage(stage);
        let bytes = image::write_dump(path, &buffer.to_bytes())?;

        reports.push(DumpReport {
            stage,
            path: path.to_path_buf(),
            shape: buffer.shape(),
            element_type: buffer.element_type(),
            bytes,
        });
    }

    Ok(reports)
}
