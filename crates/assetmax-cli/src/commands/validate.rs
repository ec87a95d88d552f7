//! Manifest validation command

use anyhow::Result;
use assetmax_validate::{ManifestValidator, ValidationReport};
use std::path::PathBuf;

pub struct ValidateArgs {
    pub input: PathBuf,
    pub format: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let report = ManifestValidator::new().validate_path(&args.input);

    if args.format == "json" {
        print_report_json(&report)?;
    } else {
        print_report_text(&args, &report);
    }

    if !report.is_valid() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report_text(args: &ValidateArgs, report: &ValidationReport) {
    println!("Validating {}", args.input.display());
    println!(
        "Found {} asset(s) across {} group(s)",
        report.asset_count, report.group_count
    );

    if !report.errors.is_empty() {
        println!("\nErrors ({}):", report.errors.len());
        for error in &report.errors {
            println!("  - {}", error);
        }
    }

    if !report.warnings.is_empty() {
        println!("\nWarnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    println!("\n{}", report.summary());
}

fn print_report_json(report: &ValidationReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
