use clap::Parser;
use mrzkit::benchmark::{DEFAULT_LOOPS, DEFAULT_RATE};
use mrzkit::config::{ConfigOverrides, DEFAULT_ASSETS_FOLDER};
use mrzkit::engine::default_engine;
use mrzkit::utils::{check_result, init_logging, Result, TAG};
use mrzkit::{Benchmark, BenchmarkOptions};
use std::path::PathBuf;
use std::process;

/// Measure engine throughput over a mix of images with and without an MRZ.
#[derive(Parser, Debug)]
#[command(name = "benchmark", version)]
struct Args {
    /// Image containing an MRZ
    #[arg(long)]
    positive: PathBuf,

    /// Image without an MRZ
    #[arg(long)]
    negative: PathBuf,

    #[arg(long, default_value_t = DEFAULT_LOOPS)]
    loops: usize,

    /// Share of loops using the positive image, within [0, 1]
    #[arg(long, default_value_t = DEFAULT_RATE)]
    rate: f64,

    #[arg(long, default_value = DEFAULT_ASSETS_FOLDER)]
    assets: String,

    #[arg(long)]
    tokenfile: Option<String>,

    #[arg(long)]
    tokendata: Option<String>,

    #[arg(long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let options = BenchmarkOptions {
        positive: args.positive,
        negative: args.negative,
        loops: args.loops,
        rate: args.rate,
        overrides: ConfigOverrides {
            assets: Some(args.assets),
            token_file: args.tokenfile,
            token_data: args.tokendata,
            ..Default::default()
        },
    };

    let mut engine = default_engine();
    let report = Benchmark::run(&mut engine, &options)?;

    check_result("Process (positive)", &report.positive_result)?;
    println!(
        "{}Elapsed time ({} loops, {} positive) = {} millis",
        TAG,
        report.loops,
        report.positives,
        report.elapsed.as_millis()
    );
    println!("{}Estimated frame rate = {:.2} fps", TAG, report.fps);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("{}{}", TAG, e);
        process::exit(1);
    }
}
