//! Manifest compilation command

use anyhow::Result;
use assetmax_compiler::ManifestCompiler;
use std::path::PathBuf;

pub struct CompileArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

pub fn run(args: CompileArgs) -> Result<()> {
    let compiler = ManifestCompiler::new();
    let outcome = compiler.compile(&args.input, args.output.as_deref())?;

    println!(
        "Compiled {} asset(s) in {} group(s) from {}",
        outcome.total_assets,
        outcome.group_count,
        args.input.display()
    );
    println!("Output: {}", outcome.output_path.display());
    Ok(())
}
