//! Build pipeline: compile the manifest, then verify its assets

use anyhow::{bail, Result};
use assetmax_compiler::ManifestCompiler;
use assetmax_manifest::{load_manifest, verify_manifest, VerifyOptions};
use std::path::PathBuf;

pub struct BuildArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub fix: bool,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let manifest = load_manifest(&args.input)?;

    println!("Compiling {}...", args.input.display());
    let outcome = ManifestCompiler::new().compile_manifest(&manifest, args.output.as_deref())?;
    println!(
        "Compiled {} asset(s) in {} group(s) to {}",
        outcome.total_assets,
        outcome.group_count,
        outcome.output_path.display()
    );

    println!("\nVerifying assets...");
    let report = verify_manifest(
        &manifest,
        &VerifyOptions {
            output_root: None,
            fix: args.fix,
        },
    );
    super::verify::print_report_text(&report);

    if !report.passed() {
        bail!("Build failed: {} critical issue(s)", report.issues.len());
    }

    println!("\nBuild complete.");
    Ok(())
}
