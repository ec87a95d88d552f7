//! Layered tool configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `ASSETMAX_MANIFEST`, `ASSETMAX_BASE_URL`
//! 2. Project-local: `.assetmax/config.toml`
//! 3. Global: `~/.assetmax/config.toml`

use assetmax_core::{AssetMaxError, Result};
use assetmax_manifest::DEFAULT_MANIFEST_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MANIFEST_ENV: &str = "ASSETMAX_MANIFEST";
pub const BASE_URL_ENV: &str = "ASSETMAX_BASE_URL";

/// `[defaults]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub manifest: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetMaxConfigFile {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone)]
pub struct AssetMaxConfig {
    pub manifest: PathBuf,
    pub base_url: Option<String>,
    pub output_dir: Option<String>,
}

impl AssetMaxConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let global = Self::global_config_path();
        let local = PathBuf::from(".assetmax/config.toml");
        Self::load_layers(global.as_deref(), Some(&local), |key| std::env::var(key).ok())
    }

    /// Load from explicit layer paths; missing files are skipped
    pub fn load_layers<F>(global: Option<&Path>, local: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AssetMaxConfigFile::default();

        for path in [global, local].into_iter().flatten() {
            if path.exists() {
                let layer = Self::load_file(path)?;
                tracing::debug!(path = %path.display(), "loaded config layer");
                Self::merge_into(&mut config, layer);
            }
        }

        Self::apply_env_overrides(&mut config, env);

        let defaults = config.defaults;
        Ok(AssetMaxConfig {
            manifest: PathBuf::from(
                defaults
                    .manifest
                    .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.to_string()),
            ),
            base_url: defaults.base_url,
            output_dir: defaults.output_dir,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".assetmax").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<AssetMaxConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            AssetMaxError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut AssetMaxConfigFile, overlay: AssetMaxConfigFile) {
        let overlay = overlay.defaults;
        if overlay.manifest.is_some() {
            base.defaults.manifest = overlay.manifest;
        }
        if overlay.base_url.is_some() {
            base.defaults.base_url = overlay.base_url;
        }
        if overlay.output_dir.is_some() {
            base.defaults.output_dir = overlay.output_dir;
        }
    }

    fn apply_env_overrides<F>(config: &mut AssetMaxConfigFile, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(manifest) = env(MANIFEST_ENV).filter(|v| !v.is_empty()) {
            config.defaults.manifest = Some(manifest);
        }
        if let Some(base_url) = env(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            config.defaults.base_url = Some(base_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("assetmax_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = temp_dir();
        let config = AssetMaxConfig::load_layers(
            Some(&dir.join("global.toml")),
            Some(&dir.join("local.toml")),
            no_env,
        )
        .unwrap();
        assert_eq!(config.manifest, PathBuf::from("asset-manifest.toml"));
        assert_eq!(config.base_url, None);
        assert_eq!(config.output_dir, None);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_project_layer_overrides_global() {
        let dir = temp_dir();
        let global = dir.join("global.toml");
        let local = dir.join("local.toml");
        std::fs::write(
            &global,
            concat!(
                "[defaults]\nmanifest = \"global.toml\"\n",
                "base_url = \"/global\"\noutput_dir = \"out\"\n",
            ),
        )
        .unwrap();
        std::fs::write(&local, "[defaults]\nbase_url = \"/cdn\"\n").unwrap();

        let config = AssetMaxConfig::load_layers(Some(&global), Some(&local), no_env).unwrap();
        assert_eq!(config.manifest, PathBuf::from("global.toml"));
        assert_eq!(config.base_url.as_deref(), Some("/cdn"));
        assert_eq!(config.output_dir.as_deref(), Some("out"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_env_var_override() {
        let dir = temp_dir();
        let local = dir.join("local.toml");
        std::fs::write(&local, "[defaults]\nmanifest = \"file.toml\"\n").unwrap();

        let env = |key: &str| match key {
            MANIFEST_ENV => Some("env.toml".to_string()),
            BASE_URL_ENV => Some("https://cdn.example.com".to_string()),
            _ => None,
        };
        let config = AssetMaxConfig::load_layers(None, Some(&local), env).unwrap();
        assert_eq!(config.manifest, PathBuf::from("env.toml"));
        assert_eq!(config.base_url.as_deref(), Some("https://cdn.example.com"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = temp_dir();
        let local = dir.join("local.toml");
        std::fs::write(&local, "[defaults]\nmanifest = 3\n").unwrap();

        let err = AssetMaxConfig::load_layers(None, Some(&local), no_env).unwrap_err();
        assert!(matches!(err, AssetMaxError::ConfigError(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
