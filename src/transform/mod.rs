//! Deterministic, stateless transforms applied to decoded images.

mod buffer;
mod normalize;
mod resize;

pub use buffer::{shape_display, Buffer};
pub use normalize::{Normalize, IMAGENET_MEAN, IMAGENET_STD};
pub use resize::{Interpolation, Resize};

use crate::error::Result;
use crate::image::ImageArray;

/// A single transform in a [`Compose`] sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Resize(Resize),
    Normalize(Normalize),
}

impl Step {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Resize(_) => "resize",
            Self::Normalize(_) => "normalize",
        }
    }

    /// Apply this step to a buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the step's parameters do not fit the buffer.
    pub fn apply(&self, input: Buffer) -> Result<Buffer> {
        match self {
            Self::Resize(resize) => resize.apply(input),
            Self::Normalize(normalize) => normalize.apply(input),
        }
    }
}

impl From<Resize> for Step {
    fn from(resize: Resize) -> Self {
        Self::Resize(resize)
    }
}

impl From<Normalize> for Step {
    fn from(normalize: Normalize) -> Self {
        Self::Normalize(normalize)
    }
}

/// Steps applied in order to an image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compose {
    steps: Vec<Step>,
}

impl Compose {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step on a copy of `image`. The input is never modified.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step.
    pub fn apply(&self, image: &ImageArray) -> Result<Buffer> {
        self.steps
            .iter()
            .try_fold(Buffer::U8(image.clone()), |buffer, step| {
                tracing::debug!("Applying {} to {:?}", step.name(), buffer.shape());
                step.apply(buffer)
            })
    }
}
