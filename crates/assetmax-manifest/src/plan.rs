//! Generation planning
//!
//! Works out which manifest assets still need generating and what that will
//! cost, without contacting any provider.

use crate::derive::{asset_relative_path, resolve_aspect_ratio};
use crate::model::Manifest;
use assetmax_core::{AssetMaxError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Options for building a plan
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Root that relative asset paths resolve against (defaults to `cli.output_dir`)
    pub output_root: Option<PathBuf>,
    /// Include assets whose file already exists
    pub force: bool,
}

/// One asset scheduled for generation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedAsset {
    pub group: String,
    pub name: String,
    pub relative_path: String,
    pub output_path: PathBuf,
    pub prompt: String,
    pub model: String,
    pub aspect_ratio: String,
    pub format: String,
    pub cost: f64,
}

/// Per-model totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsage {
    pub model: String,
    pub count: usize,
    pub cost: f64,
}

/// Assets to generate, in manifest order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    pub output_root: PathBuf,
    pub assets: Vec<PlannedAsset>,
    /// Assets left out because their file already exists
    pub skipped: usize,
}

impl GenerationPlan {
    pub fn build(manifest: &Manifest, options: &PlanOptions) -> Result<Self> {
        let output_root = match &options.output_root {
            Some(root) => root.clone(),
            None => manifest
                .cli
                .as_ref()
                .and_then(|cli| cli.output_dir.as_deref())
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| AssetMaxError::MissingRequiredField("cli.output_dir".to_string()))?,
        };

        let skip_existing = manifest
            .generation
            .as_ref()
            .map(|g| g.skip_existing)
            .unwrap_or(true);
        let include_existing = options.force || !skip_existing;

        let mut plan = GenerationPlan {
            output_root: output_root.clone(),
            ..Default::default()
        };

        for group in manifest.groups() {
            let model = group.generation_model.clone().unwrap_or_default();
            let cost = manifest
                .cli
                .as_ref()
                .map(|cli| cli.price_for(&model))
                .unwrap_or(0.0);

            for asset in &group.assets {
                let relative_path = asset_relative_path(group, &asset.name);
                let output_path = output_root.join(&relative_path);

                if !include_existing && output_path.exists() {
                    plan.skipped += 1;
                    continue;
                }

                plan.assets.push(PlannedAsset {
                    group: group.name.clone(),
                    name: asset.name.clone(),
                    relative_path,
                    output_path,
                    prompt: asset.prompt.clone(),
                    model: model.clone(),
                    aspect_ratio: resolve_aspect_ratio(group, asset).to_string(),
                    format: group.format.clone().unwrap_or_default(),
                    cost,
                });
            }
        }

        tracing::debug!(
            root = %plan.output_root.display(),
            planned = plan.assets.len(),
            skipped = plan.skipped,
            "built generation plan"
        );
        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.assets.iter().map(|a| a.cost).sum()
    }

    /// Asset counts and cost per model, ordered by first appearance
    pub fn model_breakdown(&self) -> Vec<ModelUsage> {
        let mut usage: Vec<ModelUsage> = Vec::new();
        for asset in &self.assets {
            match usage.iter_mut().find(|u| u.model == asset.model) {
                Some(entry) => {
                    entry.count += 1;
                    entry.cost += asset.cost;
                }
                None => usage.push(ModelUsage {
                    model: asset.model.clone(),
                    count: 1,
                    cost: asset.cost,
                }),
            }
        }
        usage
    }

    /// Output path for a planned asset, if it is part of the plan
    pub fn output_path_of(&self, group: &str, name: &str) -> Option<&Path> {
        self.assets
            .iter()
            .find(|a| a.group == group && a.name == name)
            .map(|a| a.output_path.as_path())
    }
}
