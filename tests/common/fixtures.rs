use hsvlab::RasterImage;
use image::{ImageBuffer, Rgb};
use tempfile::NamedTempFile;

/// Creates a width x height image where every pixel has the same BGR sample.
pub fn uniform_image(width: u32, height: u32, bgr: [u8; 3]) -> RasterImage {
    RasterImage::from_fn(width, height, |_, _| bgr).expect("Failed to build uniform image")
}

/// Creates an image whose brightness ramps from 0 on the left to 255 on the right,
/// with a different hue per row band.
pub fn gradient_image(width: u32, height: u32) -> RasterImage {
    RasterImage::from_fn(width, height, |x, y| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        match y % 3 {
            0 => [v, 0, 0],
            1 => [0, v, v / 2],
            _ => [v / 3, v / 3, v],
        }
    })
    .expect("Failed to build gradient image")
}

/// A 2x2 black image with a single non-black pixel at (0, 0).
pub fn single_seed_image(bgr: [u8; 3]) -> RasterImage {
    RasterImage::from_fn(2, 2, |x, y| if (x, y) == (0, 0) { bgr } else { [0, 0, 0] })
        .expect("Failed to build seed image")
}

/// Creates a 100x100 red test image on disk and returns the temp file.
/// The file will be automatically cleaned up when dropped.
pub fn create_test_image() -> NamedTempFile {
    let img = ImageBuffer::from_fn(100, 100, |_, _| Rgb([255u8, 0u8, 0u8]));
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Colour constants for tests, in BGR order
pub const BGR_RED: [u8; 3] = [0, 0, 255];
pub const BGR_GREEN: [u8; 3] = [0, 255, 0];
pub const BGR_BLUE: [u8; 3] = [255, 0, 0];
pub const BGR_MID_GRAY: [u8; 3] = [128, 128, 128];
