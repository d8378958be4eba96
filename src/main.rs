use clap::Parser;
use mrzkit::config::{ConfigOverrides, DEFAULT_ASSETS_FOLDER};
use mrzkit::engine::default_engine;
use mrzkit::processing::OrientationPolicy;
use mrzkit::utils::{init_logging, Result, TAG};
use mrzkit::{Recognizer, RecognizerOptions};
use std::path::PathBuf;
use std::process;

/// Read the MRZ of a passport, ID card or visa image.
#[derive(Parser, Debug)]
#[command(name = "mrzkit", version)]
struct Args {
    /// Image to process (JPEG, PNG, BMP, ...)
    #[arg(long)]
    image: PathBuf,

    /// Folder holding the engine models
    #[arg(long, default_value = DEFAULT_ASSETS_FOLDER)]
    assets: String,

    /// License token file
    #[arg(long)]
    tokenfile: Option<String>,

    /// Base64 license token
    #[arg(long)]
    tokendata: Option<String>,

    /// Backpropagation; only "True" enables it
    #[arg(long)]
    backprop: Option<String>,

    /// Vertical check; only "True" enables it
    #[arg(long)]
    vcheck: Option<String>,

    /// Image enhancement for low contrast documents; only "True" enables it
    #[arg(long)]
    ielcd: Option<String>,

    /// EXIF orientation handling: normalize or defer
    #[arg(long, default_value = "normalize")]
    orientation: OrientationPolicy,

    /// Write a copy of the image with the detected zones drawn on it
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Exit without waiting for Enter
    #[arg(long)]
    no_pause: bool,

    #[arg(long)]
    verbose: bool,
}

fn recognizer_options(args: Args) -> RecognizerOptions {
    RecognizerOptions {
        image: args.image,
        overrides: ConfigOverrides {
            assets: Some(args.assets),
            token_file: args.tokenfile,
            token_data: args.tokendata,
            backprop: args.backprop,
            vcheck: args.vcheck,
            ielcd: args.ielcd,
        },
        orientation: args.orientation,
        overlay: args.overlay,
        pause: !args.no_pause,
    }
}

fn run(args: Args) -> Result<()> {
    let options = recognizer_options(args);
    let mut engine = default_engine();
    Recognizer::run(&mut engine, &options)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use mrzkit::config::EngineConfig;

    fn parse(argv: &[&str]) -> RecognizerOptions {
        let args = Args::try_parse_from(std::iter::once("mrzkit").chain(argv.iter().copied())).unwrap();
        recognizer_options(args)
    }

    #[test]
    fn test_flags_reach_the_configuration() {
        let options = parse(&[
            "--image", "doc.jpg",
            "--assets", "/opt/assets",
            "--tokenfile", "/tmp/token.lic",
            "--tokendata", "QUJD",
            "--backprop", "True",
            "--vcheck", "true",
            "--ielcd", "False",
            "--orientation", "defer",
            "--overlay", "zones.png",
            "--no-pause",
        ]);
        assert_eq!(options.image, PathBuf::from("doc.jpg"));
        assert_eq!(options.orientation, OrientationPolicy::Defer);
        assert_eq!(options.overlay, Some(PathBuf::from("zones.png")));
        assert!(!options.pause);

        let config = EngineConfig::new().with_overrides(&options.overrides);
        assert_eq!(config.assets_folder.as_deref(), Some("/opt/assets"));
        assert_eq!(config.license_token_file.as_deref(), Some("/tmp/token.lic"));
        assert_eq!(config.license_token_data.as_deref(), Some("QUJD"));
        assert_eq!(config.backpropagation_enabled, Some(true));
        assert_eq!(config.vertical_check_enabled, Some(false));
        assert_eq!(config.ielcd, Some(false));
    }

    #[test]
    fn test_defaults() {
        let options = parse(&["--image", "doc.jpg"]);
        assert_eq!(options.overrides.assets.as_deref(), Some(DEFAULT_ASSETS_FOLDER));
        assert_eq!(options.overrides.token_file, None);
        assert_eq!(options.orientation, OrientationPolicy::Normalize);
        assert!(options.pause);
    }

    #[test]
    fn test_image_is_required() {
        assert!(Args::try_parse_from(["mrzkit", "--assets", "a"]).is_err());
        assert!(Args::try_parse_from(["mrzkit", "--image", "a.jpg", "--orientation", "sideways"]).is_err());
    }
}
