//! Element-wise comparison of a candidate dump against a reference dump.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::image::{read_dump, ElementType, RGB_CHANNELS};

/// Maximum number of individual mismatches kept in a [`Comparison`].
pub const MAX_REPORTED: usize = 20;

/// How to read and compare two dumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    pub element_type: ElementType,
    /// Largest allowed absolute difference per element.
    pub tolerance: f64,
    /// Channels per pixel, used only to locate mismatches.
    pub channels: usize,
}

impl CompareOptions {
    /// Options with the element type's default tolerance and 3 channels.
    #[must_use]
    pub const fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            tolerance: element_type.default_tolerance(),
            channels: RGB_CHANNELS,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// # Errors
    ///
    /// Returns an error for a negative or non-finite tolerance or zero channels.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tolerance".to_string(),
                reason: "must be a finite value >= 0".to_string(),
            });
        }
        if self.channels == 0 {
            return Err(Error::InvalidParameter {
                name: "channels".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// One element outside tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub pixel: usize,
    pub channel: usize,
    pub candidate: f64,
    pub reference: f64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pixel {}, channel {}: candidate[{}] = {:.6}, reference[{}] = {:.6}",
            self.pixel, self.channel, self.index, self.candidate, self.index, self.reference
        )
    }
}

/// Outcome of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub elements: usize,
    /// Exact number of mismatching elements.
    pub mismatch_count: usize,
    pub max_abs_diff: f64,
    /// The first mismatches, at most [`MAX_REPORTED`].
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.mismatch_count == 0
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_match() {
            write!(
                f,
                "All {} elements match the reference within tolerance (max diff {})",
                self.elements, self.max_abs_diff
            )
        } else {
            write!(
                f,
                "Total mismatches: {} out of {} elements (max diff {})",
                self.mismatch_count, self.elements, self.max_abs_diff
            )
        }
    }
}

/// Compare two flat value lists.
///
/// # Errors
///
/// Returns an error if the options are invalid or the lengths differ.
pub fn compare_values(
    candidate: &[f64],
    reference: &[f64],
    options: &CompareOptions,
) -> Result<Comparison> {
    options.validate()?;

    if candidate.len() != reference.len() {
        return Err(Error::LengthMismatch {
            candidate: candidate.len(),
            reference: reference.len(),
        });
    }

    let mut comparison = Comparison {
        elements: candidate.len(),
        mismatch_count: 0,
        max_abs_diff: 0.0,
        mismatches: Vec::new(),
    };

    for (index, (&c, &r)) in candidate.iter().zip(reference).enumerate() {
        let diff = (c - r).abs();
        comparison.max_abs_diff = comparison.max_abs_diff.max(diff);

        // NaN on either side counts as a mismatch.
        if diff <= options.tolerance {
            continue;
        }

        comparison.mismatch_count += 1;
        if comparison.mismatches.len() < MAX_REPORTED {
            comparison.mismatches.push(Mismatch {
                index,
                pixel: index / options.channels,
                channel: index % options.channels,
                candidate: c,
                reference: r,
            });
        }
    }

    Ok(comparison)
}

/// Read two dump files and compare them element by element.
///
/// # Errors
///
/// Returns an error if either file cannot be read or the files differ in length.
pub fn compare_dumps<P: AsRef<Path>, Q: AsRef<Path>>(
    candidate: P,
    reference: Q,
    options: &CompareOptions,
) -> Result<Comparison> {
    let candidate = candidate.as_ref();
    let reference = reference.as_ref();

    tracing::info!(
        "Comparing {} against {} as {}, tolerance {}",
        candidate.display(),
        reference.display(),
        options.element_type,
        options.tolerance
    );

    let candidate_values = read_dump(candidate, options.element_type)?;
    let reference_values = read_dump(reference, options.element_type)?;

    let comparison = compare_values(&candidate_values, &reference_values, options)?;
    for mismatch in &comparison.mismatches {
        tracing::debug!("Mismatch at {mismatch}");
    }

    Ok(comparison)
}
