//! Generation planning command
//!
//! Lists the assets a generation run would produce and their estimated cost.

use anyhow::Result;
use assetmax_manifest::{load_manifest, GenerationPlan, PlanOptions};
use std::path::PathBuf;

pub struct PlanArgs {
    pub input: PathBuf,
    pub force: bool,
    pub output_root: Option<PathBuf>,
    pub format: String,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let manifest = load_manifest(&args.input)?;
    let plan = GenerationPlan::build(
        &manifest,
        &PlanOptions {
            output_root: args.output_root,
            force: args.force,
        },
    )?;

    if args.format == "json" {
        let json = serde_json::json!({
            "outputRoot": plan.output_root,
            "assets": plan.assets,
            "skipped": plan.skipped,
            "models": plan.model_breakdown(),
            "totalCost": plan.total_cost(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("Nothing to generate ({} asset(s) already present).", plan.skipped);
        return Ok(());
    }

    println!(
        "{} asset(s) to generate into {}:",
        plan.assets.len(),
        plan.output_root.display()
    );
    for asset in &plan.assets {
        println!(
            "  {}.{} -> {} [{}, {}] ${:.3}",
            asset.group,
            asset.name,
            asset.relative_path,
            asset.model,
            asset.aspect_ratio,
            asset.cost
        );
    }

    println!("\nBy model:");
    for usage in plan.model_breakdown() {
        println!("  {:<16} {:>4} asset(s)  ${:.3}", usage.model, usage.count, usage.cost);
    }
    println!("\nEstimated total: ${:.3}", plan.total_cost());
    if plan.skipped > 0 {
        println!("Skipped {} existing asset(s); use --force to include them.", plan.skipped);
    }
    Ok(())
}
