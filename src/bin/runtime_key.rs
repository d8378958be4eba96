use clap::Parser;
use mrzkit::config::RuntimeKeyConfig;
use mrzkit::engine::{default_engine, EngineSession};
use mrzkit::utils::{check_result, init_logging, Result, TAG};
use std::process;

/// Print the runtime license key identifying this host.
#[derive(Parser, Debug)]
#[command(name = "runtime_key", version)]
struct Args {
    /// JSON document instead of the bare key; anything but "true" selects the bare key
    #[arg(long, default_value = "true")]
    json: String,

    #[arg(long)]
    assets: Option<String>,

    /// Host type, e.g. android-app, aws-instance
    #[arg(long = "type")]
    host_type: Option<String>,

    /// Application id (android-app only)
    #[arg(long)]
    appid: Option<String>,

    /// Signing certificate fingerprint (android-app only)
    #[arg(long)]
    appsign: Option<String>,

    /// Comma separated stores (android-app only)
    #[arg(long)]
    appstore: Option<String>,

    #[arg(long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let config = RuntimeKeyConfig::build(
        args.assets.as_deref(),
        args.host_type.as_deref(),
        args.appid.as_deref(),
        args.appsign.as_deref(),
        args.appstore.as_deref(),
    )?;
    let raw = args.json != "true";

    let mut engine = default_engine();
    let mut session = EngineSession::open(&mut engine, &config.to_json()?)?;

    let result = session.request_runtime_license_key(raw);
    check_result("RequestRuntimeLicenseKey", &result)?;

    session.finish()
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("{}{}", TAG, e);
        process::exit(1);
    }
}
