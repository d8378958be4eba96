use crate::models::{DecodedImage, PixelLayout};
use crate::utils::{MrzError, Result};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use log::{debug, info, warn};
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;
use std::str::FromStr;

/// What to do with the EXIF orientation of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationPolicy {
    /// Rotate/flip the pixels upright and tell the engine no rotation is left.
    #[default]
    Normalize,
    /// Leave the pixels as stored and hand the EXIF value to the engine.
    Defer,
}

impl FromStr for OrientationPolicy {
    type Err = MrzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "normalize" => Ok(OrientationPolicy::Normalize),
            "defer" => Ok(OrientationPolicy::Defer),
            other => Err(MrzError::InvalidArgument(format!(
                "unknown orientation policy '{}', expected normalize or defer",
                other
            ))),
        }
    }
}

pub struct ImageLoader;

impl ImageLoader {
    /// Decode an image file for the engine.
    pub fn load(image_path: &Path, policy: OrientationPolicy) -> Result<DecodedImage> {
        if !image_path.is_file() {
            return Err(MrzError::FileNotFound(image_path.display().to_string()));
        }

        let reader = ImageReader::open(image_path)?.with_guessed_format()?;
        let decoded = Self::decode(reader, policy)?;
        info!(
            "Decoded {}: {}x{} {} (orientation {})",
            image_path.display(),
            decoded.width,
            decoded.height,
            decoded.layout,
            decoded.exif_orientation
        );
        Ok(decoded)
    }

    /// Decode an in-memory encoded image.
    pub fn load_from_bytes(data: &[u8], policy: OrientationPolicy) -> Result<DecodedImage> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        Self::decode(reader, policy)
    }

    fn decode<R: BufRead + Seek>(
        reader: ImageReader<R>,
        policy: OrientationPolicy,
    ) -> Result<DecodedImage> {
        let mut decoder = reader.into_decoder()?;
        let orientation = decoder.orientation().unwrap_or_else(|e| {
            warn!("Could not read EXIF orientation, assuming upright: {}", e);
            Orientation::NoTransforms
        });
        let mut img = DynamicImage::from_decoder(decoder)?;

        let exif_orientation = match policy {
            OrientationPolicy::Normalize => {
                if orientation != Orientation::NoTransforms {
                    debug!("Applying EXIF orientation {:?}", orientation);
                    img.apply_orientation(orientation);
                }
                1
            }
            OrientationPolicy::Defer => orientation.to_exif(),
        };

        Self::into_decoded(img, exif_orientation)
    }

    /// Wrap decoded pixels, rejecting layouts the engine does not take.
    pub fn into_decoded(img: DynamicImage, exif_orientation: u8) -> Result<DecodedImage> {
        let layout = PixelLayout::from_color_type(img.color())?;
        let (width, height) = (img.width(), img.height());
        Ok(DecodedImage {
            width,
            height,
            pixels: img.into_bytes(),
            layout,
            stride: None,
            exif_orientation,
        })
    }
}
