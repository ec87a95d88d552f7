//! Asset verification
//!
//! Checks that a manifest's generated assets are actually on disk under
//! `cli.output_dir`. Critical issues fail verification; warnings do not.

use crate::derive::asset_relative_path;
use crate::loader::load_manifest;
use crate::model::Manifest;
use assetmax_core::AssetMaxError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for a verification run
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Root that asset paths resolve against (defaults to `cli.output_dir`)
    pub output_root: Option<PathBuf>,
    /// Create a missing output directory instead of reporting it
    pub fix: bool,
}

/// Outcome of verifying one manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Problems repaired because `fix` was set
    pub fixed: usize,
    /// Relative paths of assets with no file on disk
    pub missing_files: Vec<String>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} critical issue(s), {} warning(s), {} fixed",
            if self.passed() { "Verification passed" } else { "Verification failed" },
            self.issues.len(),
            self.warnings.len(),
            self.fixed,
        )
    }
}

/// Load the manifest at `path` and verify it; load failures become issues
pub fn verify_path<P: AsRef<Path>>(path: P, options: &VerifyOptions) -> VerificationReport {
    let path = path.as_ref();
    match load_manifest(path) {
        Ok(manifest) => verify_manifest(&manifest, options),
        Err(e) => {
            let issue = match e {
                AssetMaxError::ManifestNotFound(_) => {
                    format!("Manifest file not found: {}", path.display())
                }
                other => format!("Failed to parse manifest: {}", other),
            };
            VerificationReport {
                issues: vec![issue],
                ..Default::default()
            }
        }
    }
}

/// Verify configuration and on-disk assets of a loaded manifest
pub fn verify_manifest(manifest: &Manifest, options: &VerifyOptions) -> VerificationReport {
    let mut report = VerificationReport::default();

    match &manifest.meta {
        None => report.issues.push("Missing [meta] section in manifest".to_string()),
        Some(meta) => {
            if meta.name.as_deref().map_or(true, str::is_empty) {
                report.warnings.push("Missing meta.name".to_string());
            }
            if meta.version.as_deref().map_or(true, str::is_empty) {
                report.warnings.push("Missing meta.version".to_string());
            }
        }
    }

    let configured_root = manifest
        .cli
        .as_ref()
        .and_then(|cli| cli.output_dir.as_deref())
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);
    match (&manifest.cli, &configured_root) {
        (None, _) => report.issues.push("Missing [cli] section in manifest".to_string()),
        (Some(_), None) if options.output_root.is_none() => {
            report.issues.push("Missing cli.output_dir in manifest".to_string())
        }
        _ => {}
    }

    let output_root = options.output_root.clone().or(configured_root);
    if let Some(root) = &output_root {
        check_output_dir(root, options.fix, &mut report);
    }

    if manifest.groups().is_empty() {
        report.warnings.push("No assets defined in manifest".to_string());
    }

    for group in manifest.groups() {
        let missing = |field: &Option<String>| field.as_deref().map_or(true, str::is_empty);
        if missing(&group.category) {
            report.warnings.push(format!("Group {}: missing category", group.name));
        }
        if missing(&group.format) {
            report.warnings.push(format!("Group {}: missing format", group.name));
        }
        match group.generation_model.as_deref().filter(|m| !m.is_empty()) {
            None => report
                .warnings
                .push(format!("Group {}: missing generation_model", group.name)),
            Some(model) => {
                let known = manifest.cli.as_ref().and_then(|cli| cli.knows_model(model));
                if known == Some(false) {
                    report.issues.push(format!(
                        "Group {}: invalid generation_model \"{}\"",
                        group.name, model
                    ));
                }
            }
        }

        for asset in &group.assets {
            if asset.prompt.trim().is_empty() {
                report.warnings.push(format!(
                    "Asset {}.{}: empty or missing prompt",
                    group.name, asset.name
                ));
            }

            let Some(root) = &output_root else {
                continue;
            };
            let relative_path = asset_relative_path(group, &asset.name);
            if !root.join(&relative_path).is_file() {
                report
                    .warnings
                    .push(format!("Asset file missing: {}", relative_path));
                report.missing_files.push(relative_path);
            }
        }
    }

    tracing::debug!(
        issues = report.issues.len(),
        warnings = report.warnings.len(),
        missing = report.missing_files.len(),
        "verified manifest"
    );
    report
}

fn check_output_dir(root: &Path, fix: bool, report: &mut VerificationReport) {
    if root.is_dir() {
        return;
    }
    if !fix {
        report
            .issues
            .push(format!("Output directory does not exist: {}", root.display()));
        return;
    }
    match fs::create_dir_all(root) {
        Ok(()) => {
            tracing::info!(path = %root.display(), "created missing output directory");
            report.fixed += 1;
        }
        Err(e) => report.issues.push(format!(
            "Failed to create output directory {}: {}",
            root.display(),
            e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_manifest;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("assetmax_verify_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn manifest_in(root: &Path) -> Manifest {
        let text = format!(
            r#"
[meta]
name = "demo"
version = "1.0.0"

[cli]
output_dir = {:?}
[cli.models]
images = "flux-kontext"

[assets.ui_icons]
description = "UI icons"
category = "icons"
subcategory = "nav"
format = "png"
generation_model = "flux-kontext"

[assets.ui_icons.home]
prompt = "Simple home icon in flat style"
alt = "Home"

[assets.ui_icons.menu]
prompt = "Simple menu icon in flat style"
alt = "Menu"
"#,
            root.display().to_string()
        );
        parse_manifest(&text).unwrap()
    }

    #[test]
    fn test_missing_files_use_shared_path_rule() {
        let dir = temp_dir();
        std::fs::create_dir_all(dir.join("icons/nav")).unwrap();
        std::fs::write(dir.join("icons/nav/home.png"), b"png").unwrap();

        let report = verify_manifest(&manifest_in(&dir), &VerifyOptions::default());
        assert!(report.passed(), "unexpected issues: {:?}", report.issues);
        assert_eq!(report.missing_files, vec!["icons/nav/menu.png"]);
        assert_eq!(report.warnings, vec!["Asset file missing: icons/nav/menu.png"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_output_dir_is_critical_unless_fixed() {
        let dir = temp_dir();
        let root = dir.join("public/assets");
        let manifest = manifest_in(&root);

        let report = verify_manifest(&manifest, &VerifyOptions::default());
        assert!(!report.passed());
        assert!(report.issues[0].starts_with("Output directory does not exist"));
        assert!(!root.exists());

        let fixed = verify_manifest(
            &manifest,
            &VerifyOptions {
                output_root: None,
                fix: true,
            },
        );
        assert!(fixed.passed());
        assert_eq!(fixed.fixed, 1);
        assert!(root.is_dir());
        assert_eq!(fixed.missing_files.len(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_model_is_critical() {
        let dir = temp_dir();
        let mut manifest = manifest_in(&dir);
        if let Some(groups) = manifest.assets.as_mut() {
            groups[0].generation_model = Some("dall-e".to_string());
        }

        let report = verify_manifest(&manifest, &VerifyOptions::default());
        assert_eq!(
            report.issues,
            vec!["Group ui_icons: invalid generation_model \"dall-e\""]
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_sections() {
        let report = verify_manifest(&parse_manifest("").unwrap(), &VerifyOptions::default());
        assert_eq!(
            report.issues,
            vec!["Missing [meta] section in manifest", "Missing [cli] section in manifest"]
        );
        assert_eq!(report.warnings, vec!["No assets defined in manifest"]);
    }

    #[test]
    fn test_missing_manifest_file() {
        let dir = temp_dir();
        let path = dir.join("absent.toml");
        let report = verify_path(&path, &VerifyOptions::default());
        assert!(!report.passed());
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].starts_with("Manifest file not found"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_summary() {
        let report = VerificationReport {
            warnings: vec!["Asset file missing: icons/a.png".to_string()],
            fixed: 1,
            ..Default::default()
        };
        assert_eq!(
            report.summary(),
            "Verification passed: 0 critical issue(s), 1 warning(s), 1 fixed"
        );
    }
}
