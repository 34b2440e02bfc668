//! BGR → HSV conversion.

mod common;

use hsvlab::processing::color::{bgr_to_hsv_pixel, convert_to_hsv, value_channel};

use common::*;

#[test]
fn test_primaries_and_secondaries() {
    assert_eq!(bgr_to_hsv_pixel(BGR_RED), [0, 255, 255]);
    assert_eq!(bgr_to_hsv_pixel(BGR_GREEN), [60, 255, 255]);
    assert_eq!(bgr_to_hsv_pixel(BGR_BLUE), [120, 255, 255]);
    // yellow, cyan, magenta
    assert_eq!(bgr_to_hsv_pixel([0, 255, 255]), [30, 255, 255]);
    assert_eq!(bgr_to_hsv_pixel([255, 255, 0]), [90, 255, 255]);
    assert_eq!(bgr_to_hsv_pixel([255, 0, 255]), [150, 255, 255]);
}

#[test]
fn test_achromatic_pixels() {
    assert_eq!(bgr_to_hsv_pixel([0, 0, 0]), [0, 0, 0]);
    assert_eq!(bgr_to_hsv_pixel(BGR_MID_GRAY), [0, 0, 128]);
    assert_eq!(bgr_to_hsv_pixel([255, 255, 255]), [0, 0, 255]);
}

#[test]
fn test_mixed_colour() {
    // r=255, g=128, b=64
    assert_eq!(bgr_to_hsv_pixel([64, 128, 255]), [10, 191, 255]);
}

#[test]
fn test_hue_rounds_half_up() {
    // Raw hue of -0.5 and +0.5 either side of red
    assert_eq!(bgr_to_hsv_pixel([61, 60, 120])[0], 0);
    assert_eq!(bgr_to_hsv_pixel([60, 61, 120])[0], 1);
}

#[test]
fn test_hue_stays_below_180() {
    for b in (0..=255u16).step_by(17) {
        for g in (0..=255u16).step_by(17) {
            for r in (0..=255u16).step_by(17) {
                let [h, _, _] = bgr_to_hsv_pixel([b as u8, g as u8, r as u8]);
                assert!(h < 180, "hue {} out of range for {:?}", h, (b, g, r));
            }
        }
    }
}

#[test]
fn test_convert_image_keeps_shape_and_input() {
    let image = gradient_image(7, 5);
    let before = image.clone();

    let hsv = convert_to_hsv(&image);

    assert_eq!(hsv.dimensions(), (7, 5));
    assert_eq!(image, before, "input must not be modified");
    for y in 0..5 {
        for x in 0..7 {
            assert_eq!(hsv.pixel(x, y), bgr_to_hsv_pixel(image.pixel(x, y)));
        }
    }
}

#[test]
fn test_value_channel_matches_hsv_value_plane() {
    let image = gradient_image(9, 6);
    assert_eq!(value_channel(&image), convert_to_hsv(&image).value());
}

#[test]
fn test_hsv_is_not_the_identity() {
    // There is no HSV → BGR inverse; a coloured image's samples change meaning.
    let image = uniform_image(2, 2, BGR_BLUE);
    let hsv = convert_to_hsv(&image);
    assert_ne!(hsv.as_raw(), image.as_raw());
    assert_eq!(hsv.hue().get_pixel(0, 0)[0], 120);
    assert_eq!(hsv.saturation().get_pixel(1, 1)[0], 255);
}
