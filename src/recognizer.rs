use crate::config::{ConfigOverrides, EngineConfig};
use crate::engine::{EngineSession, MrzEngine};
use crate::models::{EngineResult, RecognitionPayload};
use crate::processing::{ImageLoader, OrientationPolicy, ZoneOverlay};
use crate::utils::{check_result, Result, TAG};
use log::{info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RecognizerOptions {
    pub image: PathBuf,
    pub overrides: ConfigOverrides,
    pub orientation: OrientationPolicy,
    /// Where to write the image annotated with the detected zones.
    pub overlay: Option<PathBuf>,
    /// Wait for Enter before deinitializing.
    pub pause: bool,
}

impl RecognizerOptions {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        RecognizerOptions {
            image: image.into(),
            overrides: ConfigOverrides::default(),
            orientation: OrientationPolicy::default(),
            overlay: None,
            pause: false,
        }
    }
}

/// Runs one image through the engine.
pub struct Recognizer;

impl Recognizer {
    /// Load, configure, init, process, report and deinit.
    ///
    /// Any failure aborts the run. Once the engine is initialized it is
    /// deinitialized on every path out of this function.
    pub fn run<E: MrzEngine + ?Sized>(
        engine: &mut E,
        options: &RecognizerOptions,
    ) -> Result<EngineResult> {
        // The loader rejects a missing file before the engine is touched
        let image = ImageLoader::load(&options.image, options.orientation)?;

        let config = EngineConfig::new()
            .with_overrides(&options.overrides)
            .to_json()?;

        let mut session = EngineSession::open(engine, &config)?;

        let result = session.process(&image);
        check_result("Process", &result)?;

        match result.payload() {
            Ok(payload) => {
                Self::summarize(&payload);
                if let Some(path) = &options.overlay {
                    ZoneOverlay::save(&image, &payload, path)?;
                }
            }
            Err(e) => warn!("Could not decode the processing payload: {}", e),
        }

        if options.pause {
            Self::wait_for_enter()?;
        }

        session.finish()?;
        Ok(result)
    }

    fn summarize(payload: &RecognitionPayload) {
        if payload.zones.is_empty() {
            info!("No MRZ zone detected");
            return;
        }
        for (i, zone) in payload.zones.iter().enumerate() {
            let verdict = if zone.looks_plausible() {
                "plausible"
            } else {
                "suspicious"
            };
            info!("Zone #{} ({}): {}", i, verdict, zone.texts().join(" | "));
        }
    }

    fn wait_for_enter() -> Result<()> {
        println!("{}Press Enter to terminate", TAG);
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}
