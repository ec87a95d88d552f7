//! Manifest bootstrapping from an existing assets directory
//!
//! Categories, prompts and aspect ratios are guessed from directory and file
//! names. The result is a starting point meant to be edited by hand.

use crate::model::{
    AssetConfig, AssetGroup, BuildSection, CategoryDefinition, CategoryKind, CliSection,
    GenerationSettings, Manifest, MetaSection, GROUP_METADATA_KEYS,
};
use assetmax_core::{AssetMaxError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 9] = [
    "png", "jpg", "jpeg", "webp", "gif", "svg", "mp4", "webm", "mov",
];

/// Directory keyword -> category
const CATEGORY_KEYWORDS: [(&str, &str); 7] = [
    ("icons", "icons"),
    ("avatars", "illustrations"),
    ("photos", "photos"),
    ("videos", "videos"),
    ("illustrations", "illustrations"),
    ("hero", "photos"),
    ("onboarding", "illustrations"),
];

const FALLBACK_CATEGORY: &str = "illustrations";
const IMAGE_MODEL: &str = "flux-kontext";
const VIDEO_MODEL: &str = "veo-3-fast";

/// Project-level values for a bootstrapped manifest
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub project_name: String,
    pub base_url: String,
    /// Directory generated assets are written to (`cli.output_dir`)
    pub output_dir: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            project_name: "assets".to_string(),
            base_url: "/assets".to_string(),
            output_dir: "public/assets".to_string(),
        }
    }
}

/// A manifest with every section filled in and no asset groups
pub fn default_manifest(options: &ScanOptions, generated_at: &str) -> Manifest {
    let category = |name: &str, kind: CategoryKind, formats: &[&str]| CategoryDefinition {
        name: name.to_string(),
        path: Some(name.to_string()),
        kind: Some(kind),
        formats: formats.iter().map(|f| f.to_string()).collect(),
    };

    let mut models = toml::Table::new();
    models.insert("images".to_string(), IMAGE_MODEL.into());
    models.insert("videos".to_string(), VIDEO_MODEL.into());

    let mut pricing = toml::Table::new();
    pricing.insert(IMAGE_MODEL.to_string(), 0.015.into());
    pricing.insert(VIDEO_MODEL.to_string(), 0.05.into());

    Manifest {
        meta: Some(MetaSection {
            name: Some(options.project_name.clone()),
            version: Some("1.0.0".to_string()),
            description: Some(format!("Asset manifest for {}", options.project_name)),
            base_url: Some(options.base_url.clone()),
            generated_at: Some(generated_at.to_string()),
        }),
        categories: Some(vec![
            category("illustrations", CategoryKind::Image, &["png", "jpg", "webp"]),
            category("photos", CategoryKind::Image, &["webp", "jpg"]),
            category("videos", CategoryKind::Video, &["mp4", "webm"]),
            category("icons", CategoryKind::Icon, &["png", "svg"]),
        ]),
        assets: Some(Vec::new()),
        build: Some(BuildSection {
            output_dir: Some("src/lib".to_string()),
            output_file: Some("assets.ts".to_string()),
            type_definitions: Some(true),
            fallback_image: Some(format!("{}/stubs/placeholder.png", options.base_url)),
        }),
        cli: Some(CliSection {
            models: Some(models),
            pricing: Some(pricing),
            output_dir: Some(options.output_dir.clone()),
        }),
        generation: Some(GenerationSettings::default()),
        source: None,
    }
}

/// Scan a directory tree and build a manifest describing the media files in it
pub fn scan_directory<P: AsRef<Path>>(
    dir: P,
    options: &ScanOptions,
    generated_at: &str,
) -> Result<Manifest> {
    let root = dir.as_ref();
    if !root.is_dir() {
        return Err(AssetMaxError::ScanError(format!(
            "Assets directory not found: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();
    collect_files(root, &mut files)?;

    let mut groups: Vec<AssetGroup> = Vec::new();
    for path in &files {
        let Some(scanned) = ScannedFile::from_path(root, path) else {
            continue;
        };

        let group_name = match &scanned.subcategory {
            Some(sub) => format!("{}_{}", scanned.category, sub),
            None => scanned.category.clone(),
        };

        let index = match groups.iter().position(|g| g.name == group_name) {
            Some(index) => index,
            None => {
                groups.push(scanned.new_group(&group_name));
                groups.len() - 1
            }
        };
        let group = &mut groups[index];

        if group.assets.iter().any(|a| a.name == scanned.name) {
            tracing::warn!(
                path = %path.display(),
                group = %group_name,
                "skipping duplicate asset name"
            );
            continue;
        }
        group.assets.push(scanned.asset_config());
    }

    tracing::info!(
        root = %root.display(),
        files = files.len(),
        groups = groups.len(),
        "scanned assets directory"
    );

    let mut manifest = default_manifest(options, generated_at);
    manifest.assets = Some(groups);
    Ok(manifest)
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if has_supported_extension(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn has_supported_extension(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

struct ScannedFile {
    name: String,
    clean_name: String,
    extension: String,
    category: String,
    subcategory: Option<String>,
}

impl ScannedFile {
    fn from_path(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        let dirs: Vec<String> = relative
            .parent()
            .map(|p| {
                p.components()
                    .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let stem = path.file_stem()?.to_str()?;
        let mut name = sanitize_name(stem);
        if name.is_empty() {
            return None;
        }
        // A group key can't be both metadata and an asset
        if GROUP_METADATA_KEYS.contains(&name.as_str()) {
            tracing::warn!(
                path = %path.display(),
                name = %name,
                "renaming asset named like group metadata"
            );
            name.push_str("_asset");
        }

        let category = dirs
            .iter()
            .find_map(|d| category_for_keyword(&d.to_lowercase()))
            .unwrap_or(FALLBACK_CATEGORY)
            .to_string();

        let subcategory = if dirs.len() >= 2 {
            dirs.last()
                .map(|d| sanitize_name(d))
                .filter(|d| !d.is_empty())
        } else {
            None
        };

        Some(Self {
            clean_name: stem.replace(['_', '-'], " "),
            name,
            extension: extension_of(path)?,
            category,
            subcategory,
        })
    }

    fn new_group(&self, group_name: &str) -> AssetGroup {
        AssetGroup {
            description: Some(format!("{} assets", group_name.replace('_', " "))),
            category: Some(self.category.clone()),
            subcategory: self.subcategory.clone(),
            format: Some(normalize_format(&self.extension).to_string()),
            generation_model: Some(
                if self.category == "videos" { VIDEO_MODEL } else { IMAGE_MODEL }.to_string(),
            ),
            ..AssetGroup::new(group_name)
        }
    }

    fn asset_config(&self) -> AssetConfig {
        let context = self
            .subcategory
            .as_deref()
            .map(|s| format!("{} ", s.replace('_', " ")))
            .unwrap_or_default();
        let clean = &self.clean_name;

        let (prompt, alt, aspect_ratio) = match self.category.as_str() {
            "icons" => (
                format!(
                    "Simple {}icon: {} in modern flat design style, \
                     clean minimalist vector with rounded edges",
                    context, clean
                ),
                format!("{} icon", clean),
                "1:1",
            ),
            "photos" => (
                format!(
                    "Professional lifestyle photography: {} scene with natural lighting \
                     and authentic expressions",
                    clean
                ),
                format!("{} photo", clean),
                "1:1",
            ),
            "videos" => (
                format!(
                    "Professional video content: {} with smooth cinematography \
                     and engaging visuals",
                    clean
                ),
                format!("{} video", clean),
                "16:9",
            ),
            _ => (
                format!(
                    "Friendly {}illustration: {} with bright colors, \
                     rounded shapes and an optimistic mood",
                    context, clean
                ),
                format!("{} illustration", clean),
                "1:1",
            ),
        };

        AssetConfig::new(self.name.clone(), prompt, alt).with_field("aspect_ratio", aspect_ratio)
    }
}

fn category_for_keyword(keyword: &str) -> Option<&'static str> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, category)| *category)
}

/// Formats the generation providers can produce directly
fn normalize_format(extension: &str) -> &'static str {
    match extension {
        "webp" => "webp",
        "mp4" | "webm" | "mov" => "mp4",
        _ => "png",
    }
}

/// Keep `[A-Za-z0-9_-]`, collapse runs of `_`, trim `_` at both ends
fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}
