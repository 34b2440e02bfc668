use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use crate::error::{PipelineError, Result};

/// Decoded 8-bit, 3-channel image with samples stored in B, G, R order.
///
/// The storage reuses `RgbImage` as a plain 3-channel buffer; the `Rgb`
/// pixel type says nothing about channel order here. Use [`RasterImage::to_rgb`]
/// before handing the buffer to anything that expects real RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    buf: RgbImage,
}

impl RasterImage {
    /// Build from interleaved BGR samples.
    pub fn from_raw(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        let shape_error = PipelineError::InvalidShape {
            width,
            height,
            channels,
        };
        if width == 0 || height == 0 || channels != 3 {
            return Err(shape_error);
        }
        if data.len() != width as usize * height as usize * 3 {
            return Err(shape_error);
        }
        let buf = RgbImage::from_raw(width, height, data).ok_or(shape_error)?;
        Ok(Self { buf })
    }

    /// Build from a closure returning the `[b, g, r]` sample of each pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidShape {
                width,
                height,
                channels: 3,
            });
        }
        Ok(Self {
            buf: RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y))),
        })
    }

    /// Convert a real RGB image, swapping the channel order.
    pub fn from_rgb(img: &RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::from_fn(width, height, |x, y| {
            let [r, g, b] = img.get_pixel(x, y).0;
            [b, g, r]
        })
    }

    /// Convert any decoded image; non-colour inputs are expanded to 3 channels.
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        Self::from_rgb(&img.to_rgb8())
    }

    pub(crate) fn from_buffer(buf: RgbImage) -> Self {
        debug_assert!(buf.width() > 0 && buf.height() > 0);
        Self { buf }
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buf.dimensions()
    }

    /// `[b, g, r]` sample at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buf.get_pixel(x, y).0
    }

    /// Interleaved BGR samples, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.buf.as_raw()
    }

    /// Copy into a real RGB image for display or encoding.
    pub fn to_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let [b, g, r] = self.pixel(x, y);
            Rgb([r, g, b])
        })
    }

    /// Number of pixels with at least one non-zero channel.
    pub fn count_non_black(&self) -> usize {
        self.buf.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    pub fn is_all_black(&self) -> bool {
        self.buf.as_raw().iter().all(|&s| s == 0)
    }
}

/// 8-bit HSV image: hue in `[0, 179]`, saturation and value in `[0, 255]`.
///
/// No conversion back to [`RasterImage`] exists:
///
/// ```compile_fail
/// use hsvlab::{HsvImage, RasterImage};
/// fn back(hsv: HsvImage) -> RasterImage {
///     RasterImage::from(hsv)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvImage {
    buf: RgbImage,
}

impl HsvImage {
    pub(crate) fn from_buffer(buf: RgbImage) -> Self {
        Self { buf }
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buf.dimensions()
    }

    /// `[h, s, v]` sample at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buf.get_pixel(x, y).0
    }

    pub fn as_raw(&self) -> &[u8] {
        self.buf.as_raw()
    }

    fn channel(&self, index: usize) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            Luma([self.buf.get_pixel(x, y)[index]])
        })
    }

    pub fn hue(&self) -> GrayImage {
        self.channel(0)
    }

    pub fn saturation(&self) -> GrayImage {
        self.channel(1)
    }

    pub fn value(&self) -> GrayImage {
        self.channel(2)
    }

    /// Raw H, S, V samples shown as if they were R, G, B.
    pub fn to_display(&self) -> RgbImage {
        self.buf.clone()
    }
}

/// Binary per-pixel selector. Every sample is either 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    buf: GrayImage,
}

impl Mask {
    pub const SELECTED: u8 = 255;
    pub const CLEARED: u8 = 0;

    pub fn from_fn(width: u32, height: u32, mut selected: impl FnMut(u32, u32) -> bool) -> Self {
        Self {
            buf: GrayImage::from_fn(width, height, |x, y| {
                Luma([if selected(x, y) { Self::SELECTED } else { Self::CLEARED }])
            }),
        }
    }

    /// Any non-zero sample counts as selected.
    pub fn from_gray(gray: &GrayImage) -> Self {
        Self::from_fn(gray.width(), gray.height(), |x, y| gray.get_pixel(x, y)[0] > 0)
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buf.dimensions()
    }

    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        self.buf.get_pixel(x, y)[0] == Self::SELECTED
    }

    pub fn count_selected(&self) -> usize {
        self.buf.as_raw().iter().filter(|&&v| v == Self::SELECTED).count()
    }

    pub fn inverted(&self) -> Self {
        Self::from_fn(self.width(), self.height(), |x, y| !self.is_selected(x, y))
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.buf
    }
}

/// Cut-off on the HSV value channel. Pixels strictly brighter are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntensityThreshold(u8);

impl IntensityThreshold {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(255);

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for IntensityThreshold {
    fn default() -> Self {
        Self(100)
    }
}

impl From<u8> for IntensityThreshold {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for IntensityThreshold {
    type Error = PipelineError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| PipelineError::ThresholdOutOfRange(value))
    }
}

impl TryFrom<i32> for IntensityThreshold {
    type Error = PipelineError;

    fn try_from(value: i32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl std::fmt::Display for IntensityThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
