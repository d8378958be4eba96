//! Repeated processing of a positive/negative image mix.

use crate::config::{ConfigOverrides, EngineConfig};
use crate::engine::{EngineSession, MrzEngine};
use crate::models::EngineResult;
use crate::processing::{ImageLoader, OrientationPolicy};
use crate::utils::{ensure_ok, MrzError, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const DEFAULT_LOOPS: usize = 100;
pub const DEFAULT_RATE: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct BenchmarkOptions {
    /// Image holding an MRZ.
    pub positive: PathBuf,
    /// Image without one.
    pub negative: PathBuf,
    pub loops: usize,
    /// Share of iterations that process the positive image.
    pub rate: f64,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub loops: usize,
    pub positives: usize,
    pub elapsed: Duration,
    pub fps: f64,
    /// Last result produced by the positive image.
    pub positive_result: EngineResult,
}

pub struct Benchmark;

impl Benchmark {
    pub fn run<E: MrzEngine + ?Sized>(
        engine: &mut E,
        options: &BenchmarkOptions,
    ) -> Result<BenchmarkReport> {
        if options.loops == 0 {
            return Err(MrzError::InvalidArgument("--loops must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&options.rate) {
            return Err(MrzError::InvalidArgument(format!(
                "--rate must be within [0, 1], got {}",
                options.rate
            )));
        }

        // Decode up front so the loop only measures the engine
        let positive = ImageLoader::load(&options.positive, OrientationPolicy::Normalize)?;
        let negative = ImageLoader::load(&options.negative, OrientationPolicy::Normalize)?;

        let schedule = Self::schedule(options.loops, options.rate);
        let positives = schedule.iter().filter(|p| **p).count();
        info!(
            "Running {} loops, {} with the positive image",
            options.loops, positives
        );

        let config = EngineConfig::new()
            .with_overrides(&options.overrides)
            .to_json()?;
        let mut session = EngineSession::open(engine, &config)?;

        let mut positive_result = None;
        let start = Instant::now();
        for (i, is_positive) in schedule.iter().enumerate() {
            let image = if *is_positive { &positive } else { &negative };
            let result = session.process(image);
            ensure_ok("Process", &result)?;
            debug!("Loop #{}: {} zone(s)", i, result.num_zones);
            if *is_positive {
                positive_result = Some(result);
            }
        }
        let elapsed = start.elapsed();

        session.finish()?;

        let positive_result = positive_result.ok_or_else(|| {
            MrzError::InvalidArgument("the schedule did not process the positive image".to_string())
        })?;

        Ok(BenchmarkReport {
            loops: options.loops,
            positives,
            elapsed,
            fps: Self::fps(elapsed, options.loops),
            positive_result,
        })
    }

    /// Which iterations process the positive image.
    ///
    /// `max(loops * rate, 1)` positives are spread evenly across the run.
    pub fn schedule(loops: usize, rate: f64) -> Vec<bool> {
        let count = ((loops as f64 * rate) as usize).clamp(1, loops.max(1));
        (0..loops)
            .map(|i| (i + 1) * count / loops > i * count / loops)
            .collect()
    }

    pub fn fps(elapsed: Duration, loops: usize) -> f64 {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        if elapsed_ms <= 0.0 {
            return f64::INFINITY;
        }
        1000.0 / (elapsed_ms / loops as f64)
    }
}
