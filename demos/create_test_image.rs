use image::{Rgb, RgbImage};

fn main() -> anyhow::Result<()> {
    let mut img = RgbImage::new(800, 600);

    // Horizontal brightness ramp with a hue change per vertical band, plus a
    // dark disc so segmentation leaves something for reconstruction to fill
    for y in 0..600 {
        for x in 0..800 {
            let v = (x * 255 / 800) as u8;
            let pixel = match y / 200 {
                0 => Rgb([v, v / 3, 0]),
                1 => Rgb([0, v, v / 2]),
                _ => Rgb([v / 2, v / 2, v]),
            };
            let (dx, dy) = (x as i32 - 600, y as i32 - 300);
            if dx * dx + dy * dy < 80 * 80 {
                img.put_pixel(x, y, Rgb([20, 20, 20]));
            } else {
                img.put_pixel(x, y, pixel);
            }
        }
    }

    img.save("test_image.png")?;
    println!("Created test_image.png (800x600 RGB gradient with dark disc)");
    Ok(())
}
