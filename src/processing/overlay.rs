use crate::models::{DecodedImage, PixelLayout, RecognitionPayload};
use crate::utils::{MrzError, Result};
use image::metadata::Orientation;
use image::{DynamicImage, GrayImage, Rgb, RgbImage, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use log::info;
use std::path::Path;

const PLAUSIBLE: Rgb<u8> = Rgb([0, 200, 0]);
const SUSPICIOUS: Rgb<u8> = Rgb([220, 0, 0]);
const LINE_BOX: Rgb<u8> = Rgb([0, 120, 255]);

/// Draws the zones reported by the engine on top of the processed image.
///
/// The engine reports boxes in the upright frame. An image whose orientation
/// was deferred to the engine is rotated upright before drawing.
pub struct ZoneOverlay;

impl ZoneOverlay {
    pub fn annotate(image: &DecodedImage, payload: &RecognitionPayload) -> Result<RgbImage> {
        let mut canvas = Self::to_rgb(image)?;

        for zone in &payload.zones {
            let color = if zone.looks_plausible() { PLAUSIBLE } else { SUSPICIOUS };
            if let Some(corners) = zone.corners() {
                // Thicker border: draw the quad twice, one pixel apart
                Self::draw_quad(&mut canvas, &corners, color, 0.0);
                Self::draw_quad(&mut canvas, &corners, color, 1.0);
            }
            for line in &zone.lines {
                if let Some(corners) = line.corners() {
                    Self::draw_quad(&mut canvas, &corners, LINE_BOX, 0.0);
                }
            }
        }

        Ok(canvas)
    }

    pub fn save(image: &DecodedImage, payload: &RecognitionPayload, path: &Path) -> Result<()> {
        let canvas = Self::annotate(image, payload)?;
        canvas.save(path)?;
        info!("Wrote zone overlay to {}", path.display());
        Ok(())
    }

    fn draw_quad(canvas: &mut RgbImage, corners: &[(f32, f32); 4], color: Rgb<u8>, grow: f32) {
        let grown = [
            (corners[0].0 - grow, corners[0].1 - grow),
            (corners[1].0 + grow, corners[1].1 - grow),
            (corners[2].0 + grow, corners[2].1 + grow),
            (corners[3].0 - grow, corners[3].1 + grow),
        ];
        for i in 0..4 {
            draw_line_segment_mut(canvas, grown[i], grown[(i + 1) % 4], color);
        }
    }

    fn to_rgb(image: &DecodedImage) -> Result<RgbImage> {
        let (w, h) = (image.width, image.height);
        let pixels = image.pixels.clone();
        let dynamic = match image.layout {
            PixelLayout::Y => GrayImage::from_raw(w, h, pixels).map(DynamicImage::ImageLuma8),
            PixelLayout::Rgb24 => RgbImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgb8),
            PixelLayout::Rgba32 => RgbaImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgba8),
            other => return Err(MrzError::UnsupportedPixelLayout(other.to_string())),
        };
        let mut dynamic = dynamic
            .ok_or_else(|| MrzError::ImageLoad("pixel buffer is smaller than width x height".to_string()))?;
        if let Some(orientation) = Orientation::from_exif(image.exif_orientation) {
            dynamic.apply_orientation(orientation);
        }
        Ok(dynamic.to_rgb8())
    }
}
