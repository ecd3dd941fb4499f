//! Reference dumper: the decoded pixel buffer, untouched.

use std::path::Path;

use crate::error::Result;
use crate::image::{self, ImageInfo};

/// Decode `input` in its native mode and write its raw pixel bytes to `output`.
///
/// Returns the image metadata for display.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or the dump cannot be written.
pub fn dump_reference<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ImageInfo> {
    let input = input.as_ref();
    let output = output.as_ref();

    tracing::info!("Loading reference image: {}", input.display());
    let img = image::open_image(input)?;
    let info = image::image_info(&img);

    tracing::debug!(
        "{} {}x{}, {} channel(s) of {} byte(s)",
        info.mode,
        info.width,
        info.height,
        info.channels,
        info.bytes_per_channel
    );

    image::write_dump(output, img.as_bytes())?;

    Ok(info)
}
