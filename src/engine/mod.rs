//! The recognition engine boundary.
//!
//! All image analysis happens inside the vendor engine. This module only
//! describes the calls it accepts ([`MrzEngine`]), a backend that logs the
//! calls without doing any work ([`DryRunEngine`]), the FFI backend behind
//! the `native` feature, and [`EngineSession`], which keeps the
//! init → process → deinit order.

mod session;

#[cfg(feature = "native")]
pub mod native;

pub use session::EngineSession;

use crate::models::{DecodedImage, EngineResult};
use log::{info, warn};

/// One engine instance. Implementations are not expected to be thread-safe.
pub trait MrzEngine {
    /// Initialize with a JSON configuration document.
    fn init(&mut self, json_config: &str) -> EngineResult;

    /// Run detection and recognition on one image.
    fn process(&mut self, image: &DecodedImage) -> EngineResult;

    /// Release everything allocated by `init`.
    fn deinit(&mut self) -> EngineResult;

    /// Ask the engine for a key identifying this host. `raw` selects the bare
    /// key over a JSON document.
    fn request_runtime_license_key(&mut self, raw: bool) -> EngineResult;
}

impl<E: MrzEngine + ?Sized> MrzEngine for Box<E> {
    fn init(&mut self, json_config: &str) -> EngineResult {
        (**self).init(json_config)
    }

    fn process(&mut self, image: &DecodedImage) -> EngineResult {
        (**self).process(image)
    }

    fn deinit(&mut self) -> EngineResult {
        (**self).deinit()
    }

    fn request_runtime_license_key(&mut self, raw: bool) -> EngineResult {
        (**self).request_runtime_license_key(raw)
    }
}

/// Logs every call and reports success without analysing anything.
#[derive(Debug, Default)]
pub struct DryRunEngine {
    initialized: bool,
    frames: u64,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MrzEngine for DryRunEngine {
    fn init(&mut self, json_config: &str) -> EngineResult {
        info!("[dry-run] init with {}", json_config);
        self.initialized = true;
        EngineResult::bodyless_ok()
    }

    fn process(&mut self, image: &DecodedImage) -> EngineResult {
        if !self.initialized {
            return EngineResult::bodyless(-1, "Engine not initialized");
        }
        if let Some(bpp) = image.layout.bytes_per_pixel() {
            let needed = image.width as usize * image.height as usize * bpp;
            if image.pixels.len() < needed {
                return EngineResult::bodyless(-2, "Pixel buffer is smaller than the image size");
            }
        }
        info!(
            "[dry-run] process {} {}x{} stride={} orientation={} ({} bytes)",
            image.layout,
            image.width,
            image.height,
            image.stride_or_zero(),
            image.exif_orientation,
            image.pixels.len()
        );
        let json = format!("{{\"duration\":0,\"frame_id\":{},\"zones\":[]}}", self.frames);
        self.frames += 1;
        EngineResult::new(0, "OK", &json, 0)
    }

    fn deinit(&mut self) -> EngineResult {
        if !self.initialized {
            warn!("[dry-run] deinit without init");
        }
        self.initialized = false;
        EngineResult::bodyless_ok()
    }

    fn request_runtime_license_key(&mut self, _raw: bool) -> EngineResult {
        EngineResult::bodyless(-1, "Runtime license keys require the native engine")
    }
}

/// The engine this build links: the vendor SDK with the `native` feature,
/// otherwise the dry-run backend.
pub fn default_engine() -> Box<dyn MrzEngine> {
    #[cfg(feature = "native")]
    {
        Box::new(native::NativeEngine::new())
    }
    #[cfg(not(feature = "native"))]
    {
        warn!("Built without the `native` feature; engine calls are only logged");
        Box::new(DryRunEngine::new())
    }
}
