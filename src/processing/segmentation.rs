use image::{Rgb, RgbImage};
use imageproc::contrast::{ThresholdType, threshold};

use crate::models::{IntensityThreshold, Mask, RasterImage};
use crate::processing::color::value_channel;

/// Select pixels whose HSV value is strictly greater than `threshold`.
pub fn intensity_mask(image: &RasterImage, threshold_value: IntensityThreshold) -> Mask {
    let value = value_channel(image);
    let binary = threshold(&value, threshold_value.value(), ThresholdType::Binary);
    Mask::from_gray(&binary)
}

/// Keep the pixels selected by `mask`, black out the rest.
///
/// # Panics
///
/// If `mask` and `image` have different dimensions.
pub fn apply_mask(image: &RasterImage, mask: &Mask) -> RasterImage {
    assert_eq!(
        image.dimensions(),
        mask.dimensions(),
        "mask dimensions must match the image"
    );
    let (width, height) = image.dimensions();
    let buf = RgbImage::from_fn(width, height, |x, y| {
        if mask.is_selected(x, y) {
            Rgb(image.pixel(x, y))
        } else {
            Rgb([0, 0, 0])
        }
    });
    RasterImage::from_buffer(buf)
}

/// Black out every pixel whose HSV value is at or below `threshold`.
///
/// A threshold of 255 always yields an all-black image.
pub fn segment_by_intensity(image: &RasterImage, threshold: IntensityThreshold) -> RasterImage {
    let mask = intensity_mask(image, threshold);
    log::debug!(
        "segmentation at {}: kept {} of {} pixels",
        threshold,
        mask.count_selected(),
        image.width() as usize * image.height() as usize
    );
    apply_mask(image, &mask)
}
