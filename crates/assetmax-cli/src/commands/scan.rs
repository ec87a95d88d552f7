//! Manifest bootstrapping command

use anyhow::{bail, Context, Result};
use assetmax_core::{Clock, SystemClock};
use assetmax_manifest::{count_assets, scan_directory, ScanOptions};
use std::path::PathBuf;

pub struct ScanArgs {
    pub dir: PathBuf,
    pub name: Option<String>,
    pub output: PathBuf,
    pub base_url: Option<String>,
    pub output_dir: Option<String>,
    pub force: bool,
}

pub fn run(args: ScanArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        );
    }

    let defaults = ScanOptions::default();
    let options = ScanOptions {
        project_name: args.name.unwrap_or(defaults.project_name),
        base_url: args.base_url.unwrap_or(defaults.base_url),
        output_dir: args.output_dir.unwrap_or(defaults.output_dir),
    };

    let manifest = scan_directory(&args.dir, &options, &SystemClock.timestamp())?;
    let content = manifest.to_toml_string()?;
    std::fs::write(&args.output, content)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Scanned {}: {} asset(s) in {} group(s)",
        args.dir.display(),
        count_assets(&manifest),
        manifest.groups().len()
    );
    println!("Manifest written to {}", args.output.display());
    println!("Review the generated prompts, then run `assetmax validate`.");
    Ok(())
}
