//! Manifest loading from TOML files

use crate::model::Manifest;
use assetmax_core::{AssetMaxError, Result};
use std::fs;
use std::path::Path;

/// Manifest file name used when no path is given
pub const DEFAULT_MANIFEST_FILE: &str = "asset-manifest.toml";

/// Load a manifest from a TOML file
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetMaxError::ManifestNotFound(path.display().to_string()));
    }

    let malformed = |message: String| AssetMaxError::MalformedManifest {
        path: path.display().to_string(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
    let mut manifest = parse_manifest(&content).map_err(|e| match e {
        AssetMaxError::TomlParseError(message) => malformed(message),
        other => other,
    })?;
    manifest.source = Some(path.to_path_buf());

    tracing::debug!(
        path = %path.display(),
        groups = manifest.groups().len(),
        "loaded manifest"
    );
    Ok(manifest)
}

/// Parse a manifest from a TOML string
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let table: toml::Table = toml::from_str(content)?;
    Manifest::from_table(&table)
}
