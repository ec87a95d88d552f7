//! Asset verification command

use anyhow::Result;
use assetmax_manifest::{verify_path, VerificationReport, VerifyOptions};
use std::path::PathBuf;

pub struct VerifyArgs {
    pub input: PathBuf,
    pub fix: bool,
    pub output_root: Option<PathBuf>,
    pub format: String,
}

pub fn run(args: VerifyArgs) -> Result<()> {
    let report = verify_path(
        &args.input,
        &VerifyOptions {
            output_root: args.output_root,
            fix: args.fix,
        },
    );

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report_text(&report);
    }

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}

pub(crate) fn print_report_text(report: &VerificationReport) {
    if !report.issues.is_empty() {
        println!("Critical issues ({}):", report.issues.len());
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    println!("{}", report.summary());
}
