pub mod benchmark;
pub mod config;
pub mod engine;
pub mod models;
pub mod processing;
pub mod recognizer;
pub mod utils;
pub mod validation;

pub use benchmark::{Benchmark, BenchmarkOptions, BenchmarkReport};
pub use engine::{DryRunEngine, EngineSession, MrzEngine};
pub use recognizer::{Recognizer, RecognizerOptions};
