use clap::Parser;
use mrzkit::models::ValidationIssueType;
use mrzkit::utils::{init_logging, Result, TAG};
use mrzkit::validation::{ExpiryValidator, MrzValidator};
use std::process;

/// Verify the check digits of an MRZ and report whether it has expired.
#[derive(Parser, Debug)]
#[command(name = "mrz_validation", version)]
struct Args {
    /// MRZ lines, top to bottom
    #[arg(required = true)]
    lines: Vec<String>,

    #[arg(long)]
    verbose: bool,
}

fn run(args: Args) -> Result<bool> {
    let result = MrzValidator::validate(&args.lines)?;
    println!("{}Format: {}", TAG, result.format);
    for check in &result.checks {
        println!(
            "{}{}: expected {}, found {} -> {}",
            TAG,
            check.name,
            check.expected,
            check.found,
            if check.is_valid { "OK" } else { "MISMATCH" }
        );
    }

    let expiry = ExpiryValidator::validate(&args.lines)?;
    println!(
        "{}Expiry date {}: {}",
        TAG,
        expiry.expiry_date,
        if expiry.not_expired { "valid" } else { "expired" }
    );

    for issue in result.issues.iter().chain(expiry.issues.iter()) {
        let kind = match issue.issue_type {
            ValidationIssueType::CheckDigit => "CHECK DIGIT",
            ValidationIssueType::Expiry => "EXPIRY",
        };
        println!("{}  - [{}] {}", TAG, kind, issue.message);
    }

    let is_valid = result.is_valid && expiry.is_valid;
    println!("{}MRZ is {}", TAG, if is_valid { "VALID" } else { "INVALID" });
    Ok(is_valid)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("{}{}", TAG, e);
            process::exit(1);
        }
    }
}
