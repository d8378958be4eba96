use crate::models::EngineResult;
use crate::utils::{MrzError, Result};
use env_logger::Env;
use log::LevelFilter;

/// Prefix for every line the tools print about engine calls.
pub const TAG: &str = "[mrzkit] ";

/// Set up `env_logger`, honoring `RUST_LOG` and defaulting to `info`.
pub fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp_millis();
    // A second init (tests, embedding) is harmless.
    let _ = builder.try_init();
}

/// Report the outcome of one engine call.
///
/// Success prints `<TAG><operation>: OK -> <json>` and returns the payload.
/// Failure returns [`MrzError::Engine`]; the caller aborts the run.
pub fn check_result<'a>(operation: &str, result: &'a EngineResult) -> Result<&'a str> {
    ensure_ok(operation, result)?;
    println!("{}{}: OK -> {}", TAG, operation, result.json);
    Ok(&result.json)
}

/// Like [`check_result`] without printing, for calls made in a loop.
pub fn ensure_ok(operation: &str, result: &EngineResult) -> Result<()> {
    if result.is_ok() {
        return Ok(());
    }
    Err(MrzError::Engine {
        operation: operation.to_string(),
        code: result.code,
        phrase: result.phrase.clone(),
    })
}
