//! Per-channel normalization step.

use crate::error::{Error, Result};

use super::Buffer;

/// Channel means of the ImageNet training set, RGB order.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Channel standard deviations of the ImageNet training set, RGB order.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Normalize each channel as `(x - mean * max) / (std * max)`, producing f32.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalize {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
    pub max_pixel_value: f32,
}

impl Default for Normalize {
    fn default() -> Self {
        Self::imagenet()
    }
}

impl Normalize {
    #[must_use]
    pub fn new(mean: impl Into<Vec<f32>>, std: impl Into<Vec<f32>>, max_pixel_value: f32) -> Self {
        Self {
            mean: mean.into(),
            std: std.into(),
            max_pixel_value,
        }
    }

    /// ImageNet constants with a max pixel value of 255.
    #[must_use]
    pub fn imagenet() -> Self {
        Self::new(IMAGENET_MEAN, IMAGENET_STD, 255.0)
    }

    /// Validate the normalization constants.
    ///
    /// # Errors
    ///
    /// Returns an error if mean and std differ in length, any std entry is not
    /// positive, or the max pixel value is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != self.std.len() {
            return Err(Error::InvalidParameter {
                name: "std".to_string(),
                reason: format!(
                    "has {} entries but mean has {}",
                    self.std.len(),
                    self.mean.len()
                ),
            });
        }

        if self.std.iter().any(|&s| s.is_nan() || s <= 0.0) {
            return Err(Error::InvalidParameter {
                name: "std".to_string(),
                reason: "every entry must be greater than 0".to_string(),
            });
        }

        if self.max_pixel_value.is_nan() || self.max_pixel_value <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "max_pixel_value".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Normalize `input`. u8 input is widened first; the output is always f32.
    ///
    /// # Errors
    ///
    /// Returns an error if the constants are invalid or the channel count does
    /// not match the number of means.
    pub fn apply(&self, input: Buffer) -> Result<Buffer> {
        self.validate()?;

        let (_, _, channels) = input.shape();
        if channels != self.mean.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} channels", self.mean.len()),
                actual: format!("{channels} channels"),
            });
        }

        let shift: Vec<f32> = self.mean.iter().map(|m| m * self.max_pixel_value).collect();
        let scale: Vec<f32> = self
            .std
            .iter()
            .map(|s| (s * self.max_pixel_value).recip())
            .collect();

        tracing::debug!("Normalizing with shift {shift:?} and scale {scale:?}");

        let mut out = input.into_f32();
        for ((_, _, c), value) in out.indexed_iter_mut() {
            *value = (*value - shift[c]) * scale[c];
        }

        Ok(Buffer::F32(out))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    #[test]
    fn test_black_and_white_pixels() {
        let mut a = Array3::<u8>::zeros((1, 2, 3));
        a.slice_mut(ndarray::s![0, 1, ..]).fill(255);

        let Buffer::F32(out) = Normalize::imagenet().apply(Buffer::U8(a)).unwrap() else {
            panic!("expected f32 output")
        };

        for c in 0..3 {
            let black = -IMAGENET_MEAN[c] / IMAGENET_STD[c];
            let white = (1.0 - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
            assert!((out[[0, 0, c]] - black).abs() < 1e-5);
            assert!((out[[0, 1, c]] - white).abs() < 1e-5);
        }
    }

    #[test]
    fn test_output_is_f32_same_shape() {
        let out = Normalize::imagenet()
            .apply(Buffer::U8(Array3::zeros((5, 7, 3))))
            .unwrap();

        assert_eq!(out.shape(), (5, 7, 3));
        assert!(matches!(out, Buffer::F32(_)));
    }

    #[test]
    fn test_channel_mismatch() {
        let err = Normalize::imagenet()
            .apply(Buffer::U8(Array3::zeros((2, 2, 1))))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_zero_std_rejected() {
        let err = Normalize::new([0.5], [0.0], 255.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_zero_max_pixel_rejected() {
        let err = Normalize::new([0.5], [0.5], 0.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }
}
