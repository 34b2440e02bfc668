use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::models::{HsvImage, RasterImage};

/// Convert one `[b, g, r]` sample to 8-bit `[h, s, v]`.
///
/// Hue is degrees halved so it fits a byte, giving `[0, 179]`.
pub fn bgr_to_hsv_pixel([b, g, r]: [u8; 3]) -> [u8; 3] {
    let v = b.max(g).max(r);
    let min = b.min(g).min(r);
    let diff = f32::from(v - min);

    let s = if v == 0 {
        0
    } else {
        (255.0 * diff / f32::from(v)).round() as u8
    };

    let h = if diff == 0.0 {
        0
    } else {
        let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
        // Red wins ties, then green.
        let raw = if v == r {
            30.0 * (gf - bf) / diff
        } else if v == g {
            60.0 + 30.0 * (bf - rf) / diff
        } else {
            120.0 + 30.0 * (rf - gf) / diff
        };
        // Half-up, so -0.5 lands on 0 rather than wrapping to 179
        let mut h = (raw + 0.5).floor() as i32;
        if h < 0 {
            h += 180;
        }
        (h % 180) as u8
    };

    [h, s, v]
}

/// BGR to HSV for a whole image. Always allocates a new buffer.
pub fn convert_to_hsv(image: &RasterImage) -> HsvImage {
    let (width, height) = image.dimensions();
    let buf = RgbImage::from_fn(width, height, |x, y| Rgb(bgr_to_hsv_pixel(image.pixel(x, y))));
    HsvImage::from_buffer(buf)
}

/// The V channel alone, i.e. `max(b, g, r)` per pixel.
///
/// Same values as `convert_to_hsv(image).value()` without building the
/// hue and saturation planes.
pub fn value_channel(image: &RasterImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [b, g, r] = image.pixel(x, y);
        Luma([b.max(g).max(r)])
    })
}
