use crate::utils::{MrzError, Result};
use image::ColorType;
use std::fmt;

/// Pixel layouts understood by the engine.
///
/// Discriminants follow the vendor's `ULTMRZ_SDK_IMAGE_TYPE` enumeration and
/// are what crosses the native boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PixelLayout {
    Rgb24 = 0,
    Rgba32 = 1,
    Bgra32 = 2,
    Nv12 = 3,
    Nv21 = 4,
    Yuv420p = 5,
    Yvu420p = 6,
    Yuv422p = 7,
    Yuv444p = 8,
    Y = 9,
    Bgr24 = 10,
}

impl PixelLayout {
    /// Layout tag for a decoded 8-bit image. Only grayscale, RGB and RGBA
    /// buffers are handed to the engine.
    pub fn from_color_type(color: ColorType) -> Result<Self> {
        match color {
            ColorType::L8 => Ok(PixelLayout::Y),
            ColorType::Rgb8 => Ok(PixelLayout::Rgb24),
            ColorType::Rgba8 => Ok(PixelLayout::Rgba32),
            other => Err(MrzError::UnsupportedPixelLayout(format!("{:?}", other))),
        }
    }

    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelLayout::Y => Some(1),
            PixelLayout::Rgb24 | PixelLayout::Bgr24 => Some(3),
            PixelLayout::Rgba32 | PixelLayout::Bgra32 => Some(4),
            // Planar and semi-planar layouts have no single pixel size
            _ => None,
        }
    }

    pub fn tag(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PixelLayout::Rgb24 => "RGB24",
            PixelLayout::Rgba32 => "RGBA32",
            PixelLayout::Bgra32 => "BGRA32",
            PixelLayout::Nv12 => "NV12",
            PixelLayout::Nv21 => "NV21",
            PixelLayout::Yuv420p => "YUV420P",
            PixelLayout::Yvu420p => "YVU420P",
            PixelLayout::Yuv422p => "YUV422P",
            PixelLayout::Yuv444p => "YUV444P",
            PixelLayout::Y => "Y",
            PixelLayout::Bgr24 => "BGR24",
        };
        f.write_str(name)
    }
}

/// A decoded image ready for one processing call.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub layout: PixelLayout,
    /// Row stride in samples. `None` lets the engine assume tightly packed rows.
    pub stride: Option<usize>,
    /// EXIF orientation the engine should apply. 1 means upright.
    pub exif_orientation: u8,
}

impl DecodedImage {
    /// Stride as passed to the engine, 0 when not overridden.
    pub fn stride_or_zero(&self) -> usize {
        self.stride.unwrap_or(0)
    }
}
