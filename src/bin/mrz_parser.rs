use clap::Parser;
use mrzkit::processing::MrzParser;
use mrzkit::utils::{init_logging, MrzError, Result, TAG};
use std::fs;
use std::path::PathBuf;
use std::process;

/// Split MRZ text into named fields.
#[derive(Parser, Debug)]
#[command(name = "mrz_parser", version)]
struct Args {
    /// MRZ lines; use --file to read them from a text file instead
    lines: Vec<String>,

    #[arg(long, conflicts_with = "lines")]
    file: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,
}

fn run(args: Args) -> Result<()> {
    let text = match args.file {
        Some(path) => {
            if !path.is_file() {
                return Err(MrzError::FileNotFound(path.display().to_string()));
            }
            fs::read_to_string(path)?
        }
        None => args.lines.join("\n"),
    };

    let document = MrzParser::parse_text(&text)?;
    println!("{}Format: {}", TAG, document.format);
    for (name, value) in &document.fields {
        println!("{}{}: {}", TAG, name, value);
    }
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
