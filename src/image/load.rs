//! Image loading utilities.

use std::path::Path;

use image::{ColorType, DynamicImage, GenericImageView};
use ndarray::Array3;

use crate::error::{Error, Result};

use super::{ImageArray, ImageInfo, RGB_CHANNELS};

/// Open and decode an image file in its native color mode.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Decoded {} as {:?} {}x{}",
        path.display(),
        img.color(),
        img.width(),
        img.height()
    );

    Ok(img)
}

/// Load an image from disk, force it to RGB, and return it as an HWC array.
///
/// # Errors
///
/// Returns an error if the image cannot be loaded.
pub fn load_rgb_array<P: AsRef<Path>>(path: P) -> Result<ImageArray> {
    let img = open_image(path)?;
    rgb_to_array(&img)
}

/// Convert a `DynamicImage` to an (height, width, 3) u8 array.
///
/// # Errors
///
/// Returns an error if the converted pixel buffer does not fit the image shape.
pub fn rgb_to_array(img: &DynamicImage) -> Result<ImageArray> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let shape = (height as usize, width as usize, RGB_CHANNELS);

    Array3::from_shape_vec(shape, rgb.into_raw()).map_err(|err| Error::ShapeMismatch {
        expected: format!("{shape:?}"),
        actual: err.to_string(),
    })
}

/// Collect the metadata printed by the reference dumper.
#[must_use]
pub fn image_info(img: &DynamicImage) -> ImageInfo {
    let color = img.color();
    let channels = usize::from(color.channel_count());
    let bytes_per_channel = usize::from(color.bytes_per_pixel()) / channels.max(1);
    let (width, height) = img.dimensions();

    ImageInfo {
        mode: mode_name(color),
        width,
        height,
        channels,
        bytes_per_channel,
        first_pixel: first_pixel(img, channels),
    }
}

/// Short mode names in the style of common imaging toolkits.
fn mode_name(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "F;RGB",
        ColorType::Rgba32F => "F;RGBA",
        _ => "unknown",
    }
}

fn first_pixel(img: &DynamicImage, channels: usize) -> Vec<f64> {
    fn take<T: Copy + Into<f64>>(raw: &[T], channels: usize) -> Vec<f64> {
        raw.iter().take(channels).map(|&v| v.into()).collect()
    }

    match img {
        DynamicImage::ImageLuma8(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageLumaA8(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageRgb8(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageRgba8(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageLuma16(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageLumaA16(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageRgb16(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageRgba16(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageRgb32F(buf) => take(buf.as_raw(), channels),
        DynamicImage::ImageRgba32F(buf) => take(buf.as_raw(), channels),
        other => take(other.to_rgba32f().as_raw(), channels),
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Luma, Rgb};

    use super::*;

    #[test]
    fn test_array_shape() {
        let img = DynamicImage::new_rgb8(100, 60);
        let array = rgb_to_array(&img).unwrap();

        assert_eq!(array.shape(), &[60, 100, 3]);
    }

    #[test]
    fn test_array_is_row_major_hwc() {
        let buf: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 9]));
        let array = rgb_to_array(&DynamicImage::ImageRgb8(buf)).unwrap();

        assert_eq!(array[[1, 2, 0]], 2);
        assert_eq!(array[[1, 2, 1]], 1);
        assert_eq!(array[[0, 0, 2]], 9);
    }

    #[test]
    fn test_grayscale_forced_to_rgb() {
        let buf: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(5, 4, Luma([77]));
        let array = rgb_to_array(&DynamicImage::ImageLuma8(buf)).unwrap();

        assert_eq!(array.shape(), &[4, 5, 3]);
        assert!(array.iter().all(|&v| v == 77));
    }

    #[test]
    fn test_info_rgb() {
        let buf: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 6, Rgb([1, 2, 3]));
        let info = image_info(&DynamicImage::ImageRgb8(buf));

        assert_eq!(info.mode, "RGB");
        assert_eq!((info.width, info.height), (8, 6));
        assert_eq!(info.channels, 3);
        assert_eq!(info.bytes_per_channel, 1);
        assert_eq!(info.first_pixel, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_info_luma16() {
        let img = DynamicImage::new_luma16(3, 3);
        let info = image_info(&img);

        assert_eq!(info.mode, "I;16");
        assert_eq!(info.channels, 1);
        assert_eq!(info.bytes_per_channel, 2);
        assert_eq!(info.raw_len(), img.as_bytes().len());
    }

    #[test]
    fn test_missing_file() {
        let err = open_image("does/not/exist.bmp").unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}
