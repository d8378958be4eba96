use crate::engine::MrzEngine;
use crate::models::{DecodedImage, EngineResult};
use crate::utils::{check_result, Result};
use log::{debug, warn};

/// An initialized engine.
///
/// A session only exists after a successful `init`, so processing cannot
/// happen on an engine that failed to start. [`EngineSession::finish`]
/// deinitializes and reports the outcome; a session dropped on an error path
/// deinitializes on its own.
pub struct EngineSession<'e, E: MrzEngine + ?Sized> {
    engine: &'e mut E,
    open: bool,
}

impl<'e, E: MrzEngine + ?Sized> EngineSession<'e, E> {
    pub fn open(engine: &'e mut E, json_config: &str) -> Result<Self> {
        let result = engine.init(json_config);
        check_result("Init", &result)?;
        Ok(EngineSession { engine, open: true })
    }

    pub fn process(&mut self, image: &DecodedImage) -> EngineResult {
        self.engine.process(image)
    }

    pub fn request_runtime_license_key(&mut self, raw: bool) -> EngineResult {
        self.engine.request_runtime_license_key(raw)
    }

    pub fn finish(mut self) -> Result<()> {
        self.open = false;
        let result = self.engine.deinit();
        check_result("DeInit", &result)?;
        Ok(())
    }
}

impl<'e, E: MrzEngine + ?Sized> Drop for EngineSession<'e, E> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        let result = self.engine.deinit();
        if result.is_ok() {
            debug!("Engine deinitialized after an aborted run");
        } else {
            warn!("DeInit after an aborted run failed: {}", result.phrase);
        }
    }
}
