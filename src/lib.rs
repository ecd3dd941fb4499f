//! # refdump
//!
//! Generates raw binary reference fixtures for image preprocessing parity tests,
//! and compares dumps produced by another implementation against them.
//!
//! Two dumpers share the same input image:
//!
//! - the reference dumper writes the decoded pixel buffer as-is;
//! - the transform dumper writes a resized (224x224, u8), a normalized
//!   (original size, f32) and a resized-then-normalized buffer.
//!
//! Dumps are headerless row-major (height, width, channel) element arrays.
//!
//! ## Example
//!
//! ```no_run
//! use refdump::{dump_reference, dump_transforms, FixturePaths, TransformConfig};
//!
//! # fn main() -> refdump::Result<()> {
//! let paths = FixturePaths::default();
//! let info = dump_reference(refdump::DEFAULT_INPUT, &paths.reference)?;
//! println!("{info}");
//!
//! for report in dump_transforms(refdump::DEFAULT_INPUT, &paths, &TransformConfig::default())? {
//!     println!("{report}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod transform;

pub use compare::{compare_dumps, CompareOptions, Comparison};
pub use error::{Error, Result};
pub use crate::image::{ElementType, ImageInfo};
pub use pipeline::{
    dump_reference, dump_transforms, DumpReport, FixturePaths, Stage, TransformConfig,
    DEFAULT_INPUT,
};
pub use transform::Interpolation;
