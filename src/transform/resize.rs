//! Resize step.

use std::fmt;
use std::str::FromStr;

use image::{imageops::FilterType, ImageBuffer, Rgb};
use ndarray::Array3;

use crate::error::{Error, Result};
use crate::image::RGB_CHANNELS;

use super::Buffer;

/// Sampling strategy used by [`Resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Bilinear with half-pixel centers, edge-clamped.
    #[default]
    Linear,
    /// Bilinear sampling at `dst * (in - 1) / (out - 1)`.
    AlignCorners,
    /// Lanczos3 resampling from the `image` crate. RGB only.
    Lanczos3,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::AlignCorners => "align-corners",
            Self::Lanczos3 => "lanczos3",
        })
    }
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "bilinear" => Ok(Self::Linear),
            "align-corners" | "align_corners" => Ok(Self::AlignCorners),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(Error::InvalidParameter {
                name: "interpolation".to_string(),
                reason: format!("unknown mode {other:?}"),
            }),
        }
    }
}

/// Resize to a fixed (height, width). The element type is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resize {
    pub height: usize,
    pub width: usize,
    pub interpolation: Interpolation,
}

impl Resize {
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            interpolation: Interpolation::Linear,
        }
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Resize `input` to the target size.
    ///
    /// # Errors
    ///
    /// Returns an error if the target or input is empty, or if Lanczos3 is
    /// requested for a buffer that is not 3-channel.
    pub fn apply(&self, input: Buffer) -> Result<Buffer> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::InvalidParameter {
                name: "size".to_string(),
                reason: format!("target {}x{} must be non-empty", self.height, self.width),
            });
        }

        let (in_h, in_w, channels) = input.shape();
        if in_h == 0 || in_w == 0 {
            return Err(Error::ShapeMismatch {
                expected: "non-empty image".to_string(),
                actual: format!("({in_h}, {in_w}, {channels})"),
            });
        }

        tracing::debug!(
            "Resizing ({in_h}, {in_w}, {channels}) -> ({}, {}) with {}",
            self.height,
            self.width,
            self.interpolation
        );

        if self.interpolation == Interpolation::Lanczos3 {
            return self.lanczos3(input);
        }

        match input {
            Buffer::U8(a) => {
                let resized = self.bilinear(&a.mapv(f32::from));
                Ok(Buffer::U8(resized.mapv(round_to_u8)))
            }
            Buffer::F32(a) => Ok(Buffer::F32(self.bilinear(&a))),
        }
    }

    fn bilinear(&self, input: &Array3<f32>) -> Array3<f32> {
        let (in_h, in_w, channels) = input.dim();
        let ys = taps(in_h, self.height, self.interpolation);
        let xs = taps(in_w, self.width, self.interpolation);

        Array3::from_shape_fn((self.height, self.width, channels), |(y, x, c)| {
            let (ty, tx) = (ys[y], xs[x]);

            let tl = input[[ty.lo, tx.lo, c]];
            let tr = input[[ty.lo, tx.hi, c]];
            let bl = input[[ty.hi, tx.lo, c]];
            let br = input[[ty.hi, tx.hi, c]];

            let top = (1.0 - tx.frac) * tl + tx.frac * tr;
            let bottom = (1.0 - tx.frac) * bl + tx.frac * br;
            (1.0 - ty.frac) * top + ty.frac * bottom
        })
    }

    fn lanczos3(&self, input: Buffer) -> Result<Buffer> {
        let (in_h, in_w, channels) = input.shape();
        if channels != RGB_CHANNELS {
            return Err(Error::InvalidParameter {
                name: "interpolation".to_string(),
                reason: format!("lanczos3 needs {RGB_CHANNELS} channels, got {channels}"),
            });
        }

        let (in_w, in_h) = (to_u32("width", in_w)?, to_u32("height", in_h)?);
        let (out_w, out_h) = (to_u32("width", self.width)?, to_u32("height", self.height)?);
        let shape_err = || Error::ShapeMismatch {
            expected: format!("({in_h}, {in_w}, {channels}) buffer"),
            actual: "buffer of a different length".to_string(),
        };

        // Logical iteration order, whatever the strides of the array.
        match input {
            Buffer::U8(a) => {
                let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(in_w, in_h, a.iter().copied().collect())
                        .ok_or_else(shape_err)?;
                let resized = image::imageops::resize(&img, out_w, out_h, FilterType::Lanczos3);
                to_array(resized.into_raw(), self.height, self.width).map(Buffer::U8)
            }
            Buffer::F32(a) => {
                let img: ImageBuffer<Rgb<f32>, Vec<f32>> =
                    ImageBuffer::from_raw(in_w, in_h, a.iter().copied().collect())
                        .ok_or_else(shape_err)?;
                let resized = image::imageops::resize(&img, out_w, out_h, FilterType::Lanczos3);
                to_array(resized.into_raw(), self.height, self.width).map(Buffer::F32)
            }
        }
    }
}

fn to_u32(name: &str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::InvalidParameter {
        name: name.to_string(),
        reason: format!("{value} does not fit in u32"),
    })
}

/// Source neighbours and weight for one output coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f32,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn taps(in_len: usize, out_len: usize, interpolation: Interpolation) -> Vec<Tap> {
    let last = in_len - 1;

    match interpolation {
        Interpolation::AlignCorners => {
            let ratio = if out_len > 1 {
                last as f32 / (out_len - 1) as f32
            } else {
                0.0
            };
            (0..out_len)
                .map(|i| {
                    let g = i as f32 * ratio;
                    let lo = (g as usize).min(last);
                    let hi = if lo + 1 < in_len { lo + 1 } else { lo };
                    Tap {
                        lo,
                        hi,
                        frac: g - lo as f32,
                    }
                })
                .collect()
        }
        Interpolation::Linear | Interpolation::Lanczos3 => {
            let scale = in_len as f64 / out_len as f64;
            (0..out_len)
                .map(|i| {
                    let src = (i as f64 + 0.5).mul_add(scale, -0.5);
                    if src <= 0.0 {
                        return Tap { lo: 0, hi: 0, frac: 0.0 };
                    }
                    let lo = src.floor() as usize;
                    if lo >= last {
                        return Tap { lo: last, hi: last, frac: 0.0 };
                    }
                    Tap {
                        lo,
                        hi: lo + 1,
                        frac: (src - src.floor()) as f32,
                    }
                })
                .collect()
        }
    }
}

/// Round to nearest and saturate into the u8 range.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_u8(value: f32) -> u8 {
    // Safe: clamped to [0, 255] range before casting
    (value + 0.5).clamp(0.0, 255.0) as u8
}

fn to_array<T>(raw: Vec<T>, height: usize, width: usize) -> Result<Array3<T>> {
    Array3::from_shape_vec((height, width, RGB_CHANNELS), raw).map_err(|err| Error::ShapeMismatch {
        expected: format!("({height}, {width}, {RGB_CHANNELS})"),
        actual: err.to_string(),
    })
}
