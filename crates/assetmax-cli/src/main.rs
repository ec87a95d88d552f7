//! AssetMax CLI - compile, validate and plan asset manifests

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{build, compile, plan, scan, validate, verify};
use config::AssetMaxConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assetmax")]
#[command(about = "Manifest-driven asset definitions for AI-generated media", long_about = None)]
#[command(version)]
struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a manifest into TypeScript asset definitions
    Compile {
        /// Path to manifest file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to build.output_dir/build.output_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a manifest for missing fields and questionable prompts
    Validate {
        /// Path to manifest file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List assets that still need generating and their estimated cost
    Plan {
        /// Path to manifest file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Include assets whose files already exist
        #[arg(long)]
        force: bool,

        /// Root directory for generated files (defaults to cli.output_dir)
        #[arg(long)]
        output_root: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Check that every asset file exists under the output directory
    Verify {
        /// Path to manifest file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Create a missing output directory
        #[arg(long)]
        fix: bool,

        /// Root directory for generated files (defaults to cli.output_dir)
        #[arg(long)]
        output_root: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Compile the manifest, then verify its assets
    Build {
        /// Path to manifest file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to build.output_dir/build.output_file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Create a missing output directory
        #[arg(long)]
        fix: bool,
    },

    /// Build a starter manifest from an existing assets directory
    Scan {
        /// Directory to scan
        dir: PathBuf,

        /// Project name
        #[arg(short, long)]
        name: Option<String>,

        /// Manifest file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Public base URL of the assets
        #[arg(long)]
        base_url: Option<String>,

        /// Directory generated assets are written to
        #[arg(long)]
        output_dir: Option<String>,

        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AssetMaxConfig::load()?;

    match cli.command {
        Commands::Compile { input, output } => compile::run(compile::CompileArgs {
            input: input.unwrap_or(config.manifest),
            output,
        }),
        Commands::Validate { input, format } => validate::run(validate::ValidateArgs {
            input: input.unwrap_or(config.manifest),
            format,
        }),
        Commands::Plan {
            input,
            force,
            output_root,
            format,
        } => plan::run(plan::PlanArgs {
            input: input.unwrap_or(config.manifest),
            force,
            output_root,
            format,
        }),
        Commands::Verify {
            input,
            fix,
            output_root,
            format,
        } => verify::run(verify::VerifyArgs {
            input: input.unwrap_or(config.manifest),
            fix,
            output_root,
            format,
        }),
        Commands::Build { input, output, fix } => build::run(build::BuildArgs {
            input: input.unwrap_or(config.manifest),
            output,
            fix,
        }),
        Commands::Scan {
            dir,
            name,
            output,
            base_url,
            output_dir,
            force,
        } => scan::run(scan::ScanArgs {
            dir,
            name,
            output: output.unwrap_or(config.manifest),
            base_url: base_url.or(config.base_url),
            output_dir: output_dir.or(config.output_dir),
            force,
        }),
    }
}
