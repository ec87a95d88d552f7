//! Manifest checks
//!
//! Runs structural, per-group and configuration checks in that order. Every
//! finding is accumulated; nothing short-circuits except a failed load.

use crate::report::ValidationReport;
use assetmax_manifest::{
    count_assets, is_js_identifier, load_manifest, to_camel_case, AssetGroup, Manifest,
};
use std::path::Path;

/// Prompts shorter than this draw a warning
pub const MIN_PROMPT_CHARS: usize = 10;
/// Prompts longer than this draw a warning
pub const MAX_PROMPT_CHARS: usize = 500;

const REQUIRED_GROUP_FIELDS: [&str; 4] = ["description", "category", "format", "generation_model"];

fn missing(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Audits manifests without modifying them
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestValidator;

impl ManifestValidator {
    pub fn new() -> Self {
        Self
    }

    /// Load and validate the manifest at `path`
    ///
    /// Load failures are reported as a single fatal error with zero counts.
    pub fn validate_path<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        match load_manifest(path.as_ref()) {
            Ok(manifest) => self.validate(&manifest),
            Err(e) => {
                tracing::warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "manifest could not be loaded"
                );
                ValidationReport::fatal(e)
            }
        }
    }

    /// Validate an already loaded manifest
    pub fn validate(&self, manifest: &Manifest) -> ValidationReport {
        let mut report = ValidationReport::new();

        check_structure(manifest, &mut report);
        for group in manifest.groups() {
            check_group(group, &mut report);
        }
        check_configuration(manifest, &mut report);

        report.asset_count = count_assets(manifest);
        report.group_count = manifest.groups().len();

        tracing::debug!(
            valid = report.valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated manifest"
        );
        report
    }
}

fn check_structure(manifest: &Manifest, report: &mut ValidationReport) {
    let sections = [
        ("meta", manifest.meta.is_some()),
        ("categories", manifest.categories.is_some()),
        ("assets", manifest.assets.is_some()),
        ("build", manifest.build.is_some()),
        ("cli", manifest.cli.is_some()),
    ];
    for (section, present) in sections {
        if !present {
            report.error(format!("Missing required section: [{}]", section));
        }
    }

    if let Some(meta) = &manifest.meta {
        let fields = [
            ("name", meta.name.as_deref()),
            ("version", meta.version.as_deref()),
            ("description", meta.description.as_deref()),
        ];
        for (field, value) in fields {
            if missing(value) {
                report.error(format!("Missing meta.{}", field));
            }
        }
    }
}

fn check_group(group: &AssetGroup, report: &mut ValidationReport) {
    for field in REQUIRED_GROUP_FIELDS {
        if missing(group.metadata(field)) {
            report.error(format!(
                "Asset group '{}' missing required field: {}",
                group.name, field
            ));
        }
    }

    let export_name = to_camel_case(&group.name);
    if !is_js_identifier(&export_name) {
        report.warning(format!(
            "Asset group '{}' does not form a valid export name: {}",
            group.name, export_name
        ));
    }

    for asset in &group.assets {
        let label = format!("{}.{}", group.name, asset.name);
        if asset.prompt.is_empty() {
            report.error(format!("Asset '{}' missing required field: prompt", label));
        }
        if missing(asset.alt.as_deref()) {
            report.error(format!("Asset '{}' missing required field: alt", label));
        }

        let length = asset.prompt.chars().count();
        if length > 0 && length < MIN_PROMPT_CHARS {
            report.warning(format!("Asset '{}' has very short prompt", label));
        }
        if length > MAX_PROMPT_CHARS {
            report.warning(format!(
                "Asset '{}' has very long prompt (>{} chars)",
                label, MAX_PROMPT_CHARS
            ));
        }
    }

    for entry in &group.incomplete {
        let label = format!("{}.{}", group.name, entry.name);
        report.error(format!("Asset '{}' missing required field: prompt", label));
        if missing(entry.alt.as_deref()) {
            report.error(format!("Asset '{}' missing required field: alt", label));
        }
    }
}

fn check_configuration(manifest: &Manifest, report: &mut ValidationReport) {
    if let Some(cli) = &manifest.cli {
        if cli.models.is_none() {
            report.error("CLI configuration missing models section");
        }
        if cli.pricing.is_none() {
            report.warning("CLI configuration missing pricing section");
        }
    }

    if let Some(build) = &manifest.build {
        let fields = [
            ("output_dir", build.output_dir.as_deref()),
            ("output_file", build.output_file.as_deref()),
        ];
        for (field, value) in fields {
            if missing(value) {
                report.error(format!("Build configuration missing: {}", field));
            }
        }
    }
}
