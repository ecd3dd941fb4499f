//! Image loading and raw dump utilities.

mod dump;
mod load;

pub use dump::{read_dump, write_dump, ElementType};
pub use load::{image_info, load_rgb_array, open_image, rgb_to_array};

use std::fmt;

use ndarray::Array3;

/// Decoded image as an HWC array (height, width, channels).
pub type ImageArray = Array3<u8>;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;

/// Basic metadata of a decoded image, as reported by the reference dumper.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    /// Color mode name (`L`, `RGB`, `RGBA`, ...).
    pub mode: &'static str,
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub bytes_per_channel: usize,
    /// Channel values of the top-left pixel. Empty for a zero-sized image.
    pub first_pixel: Vec<f64>,
}

impl ImageInfo {
    /// Length in bytes of the decoded pixel buffer.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels * self.bytes_per_channel
    }

    /// Formats the first pixel: a bare value for one channel, a tuple otherwise.
    #[must_use]
    pub fn first_pixel_display(&self) -> String {
        match self.first_pixel.as_slice() {
            [] => "None".to_string(),
            [value] => value.to_string(),
            values => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                format!("({})", parts.join(", "))
            }
        }
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Size: ({}, {})", self.width, self.height)?;
        write!(f, "First pixel: {}", self.first_pixel_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(first_pixel: Vec<f64>) -> ImageInfo {
        ImageInfo {
            mode: "RGB",
            width: 4,
            height: 2,
            channels: 3,
            bytes_per_channel: 1,
            first_pixel,
        }
    }

    #[test]
    fn test_raw_len() {
        assert_eq!(info(vec![0.0, 0.0, 0.0]).raw_len(), 24);
    }

    #[test]
    fn test_first_pixel_display() {
        assert_eq!(info(vec![12.0, 34.0, 56.0]).first_pixel_display(), "(12, 34, 56)");
        assert_eq!(info(vec![7.0]).first_pixel_display(), "7");
        assert_eq!(info(vec![]).first_pixel_display(), "None");
    }

    #[test]
    fn test_display_lines() {
        let text = info(vec![1.0, 2.0, 3.0]).to_string();
        assert_eq!(text, "Mode: RGB\nSize: (4, 2)\nFirst pixel: (1, 2, 3)");
    }
}
