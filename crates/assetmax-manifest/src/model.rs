//! Typed asset manifest model
//!
//! An asset group in TOML mixes group metadata and asset entries as sibling
//! keys. The model separates them once at load time: a table-valued sibling
//! with a `prompt` key is an asset, everything else is metadata or ignored.

use assetmax_core::{AssetMaxError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Keys that always denote group metadata, never an asset entry
pub const GROUP_METADATA_KEYS: [&str; 6] = [
    "description",
    "category",
    "subcategory",
    "format",
    "generation_model",
    "aspect_ratio",
];

/// `[meta]` - project identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaSection {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// Kind of media a category holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Image,
    Video,
    Icon,
}

/// `[categories.<name>]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    #[serde(skip)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<CategoryKind>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub formats: Vec<String>,
}

/// `[build]` - where and how the compiled definitions are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub type_definitions: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub fallback_image: Option<String>,
}

/// `[cli]` - model aliases, unit pricing and generated asset root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliSection {
    #[serde(default, deserialize_with = "lenient::table", skip_serializing_if = "Option::is_none")]
    pub models: Option<toml::Table>,
    #[serde(default, deserialize_with = "lenient::table", skip_serializing_if = "Option::is_none")]
    pub pricing: Option<toml::Table>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

impl CliSection {
    /// Unit cost for a model, 0 when unpriced
    pub fn price_for(&self, model: &str) -> f64 {
        match self.pricing.as_ref().and_then(|p| p.get(model)) {
            Some(toml::Value::Float(f)) => *f,
            Some(toml::Value::Integer(i)) => *i as f64,
            _ => 0.0,
        }
    }

    /// Whether `model` is configured as a `models` value or a `pricing` key.
    /// `None` when neither table is present.
    pub fn knows_model(&self, model: &str) -> Option<bool> {
        if self.models.is_none() && self.pricing.is_none() {
            return None;
        }
        let aliased = self
            .models
            .iter()
            .flat_map(|models| models.values())
            .any(|value| value.as_str() == Some(model));
        let priced = self.pricing.as_ref().is_some_and(|p| p.contains_key(model));
        Some(aliased || priced)
    }
}

/// `[generation]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_true", deserialize_with = "lenient::enabled")]
    pub skip_existing: bool,
    #[serde(default = "default_true", deserialize_with = "lenient::enabled")]
    pub convert_formats: bool,
    #[serde(default = "default_true", deserialize_with = "lenient::enabled")]
    pub verify_output: bool,
    #[serde(default = "default_max_retries", deserialize_with = "lenient::retries")]
    pub max_retries: u32,
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            skip_existing: true,
            convert_formats: true,
            verify_output: true,
            max_retries: default_max_retries(),
        }
    }
}

/// Field readers that never reject a value of the wrong type
///
/// Hand-edited manifests often carry `version = 1` or similar. Those load
/// with the value stringified (or dropped when no sensible reading exists)
/// so validation can still report on the rest of the file.
mod lenient {
    use super::{default_max_retries, scalar_to_string, CategoryKind};
    use serde::{Deserialize, Deserializer};

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Some(scalar_to_string(&toml::Value::deserialize(d)?)))
    }

    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match toml::Value::deserialize(d)? {
            toml::Value::Array(items) => items.iter().map(scalar_to_string).collect(),
            other => vec![scalar_to_string(&other)],
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(toml::Value::deserialize(d)?.as_bool())
    }

    pub fn enabled<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(toml::Value::deserialize(d)?.as_bool().unwrap_or(true))
    }

    pub fn retries<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        Ok(toml::Value::deserialize(d)?
            .as_integer()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or_else(default_max_retries))
    }

    pub fn table<'de, D: Deserializer<'de>>(d: D) -> Result<Option<toml::Table>, D::Error> {
        Ok(match toml::Value::deserialize(d)? {
            toml::Value::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn kind<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CategoryKind>, D::Error> {
        Ok(toml::Value::deserialize(d)?.try_into().ok())
    }
}

/// A generatable asset: the `prompt`-bearing entry of a group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetConfig {
    pub name: String,
    pub prompt: String,
    pub alt: Option<String>,
    /// Every other key in source order, `aspect_ratio` included
    pub fields: Vec<(String, String)>,
}

impl AssetConfig {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            alt: Some(alt.into()),
            fields: Vec::new(),
        }
    }

    /// Builder-style custom field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Asset-level aspect ratio, if set and non-empty
    pub fn aspect_ratio(&self) -> Option<&str> {
        self.field("aspect_ratio").filter(|v| !v.is_empty())
    }

    fn from_table(name: &str, table: &toml::Table) -> Self {
        let mut asset = AssetConfig {
            name: name.to_string(),
            ..Default::default()
        };
        for (key, value) in table {
            match key.as_str() {
                "prompt" => asset.prompt = scalar_to_string(value),
                "alt" => asset.alt = Some(scalar_to_string(value)),
                _ => asset.fields.push((key.clone(), scalar_to_string(value))),
            }
        }
        asset
    }

    fn to_table(&self) -> toml::Table {
        let mut table = toml::Table::new();
        table.insert("prompt".to_string(), self.prompt.clone().into());
        if let Some(alt) = &self.alt {
            table.insert("alt".to_string(), alt.clone().into());
        }
        for (key, value) in &self.fields {
            table.insert(key.clone(), value.clone().into());
        }
        table
    }
}

/// A table-valued group entry that lacks `prompt`
///
/// Never compiled or counted; kept so validation can name what is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncompleteEntry {
    pub name: String,
    pub alt: Option<String>,
}

/// A named group: shared metadata plus its assets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetGroup {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub format: Option<String>,
    pub generation_model: Option<String>,
    pub aspect_ratio: Option<String>,
    pub assets: Vec<AssetConfig>,
    pub incomplete: Vec<IncompleteEntry>,
}

impl AssetGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a metadata field by its manifest key
    pub fn metadata(&self, key: &str) -> Option<&str> {
        let value = match key {
            "description" => &self.description,
            "category" => &self.category,
            "subcategory" => &self.subcategory,
            "format" => &self.format,
            "generation_model" => &self.generation_model,
            "aspect_ratio" => &self.aspect_ratio,
            _ => return None,
        };
        value.as_deref()
    }

    fn from_table(name: &str, table: &toml::Table) -> Self {
        let mut group = AssetGroup::new(name);
        for (key, value) in table {
            let text = || Some(scalar_to_string(value));
            match key.as_str() {
                "description" => group.description = text(),
                "category" => group.category = text(),
                "subcategory" => group.subcategory = text(),
                "format" => group.format = text(),
                "generation_model" => group.generation_model = text(),
                "aspect_ratio" => group.aspect_ratio = text(),
                _ => {
                    if let toml::Value::Table(entry) = value {
                        if entry.contains_key("prompt") {
                            group.assets.push(AssetConfig::from_table(key, entry));
                        } else {
                            group.incomplete.push(IncompleteEntry {
                                name: key.clone(),
                                alt: entry.get("alt").map(scalar_to_string),
                            });
                        }
                    }
                }
            }
        }
        group
    }

    fn to_table(&self) -> toml::Table {
        let mut table = toml::Table::new();
        for key in GROUP_METADATA_KEYS {
            if let Some(value) = self.metadata(key) {
                table.insert(key.to_string(), value.to_string().into());
            }
        }
        for asset in &self.assets {
            table.insert(asset.name.clone(), toml::Value::Table(asset.to_table()));
        }
        table
    }
}

/// The parsed asset manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub meta: Option<MetaSection>,
    pub categories: Option<Vec<CategoryDefinition>>,
    pub assets: Option<Vec<AssetGroup>>,
    pub build: Option<BuildSection>,
    pub cli: Option<CliSection>,
    pub generation: Option<GenerationSettings>,
    /// File the manifest was loaded from, if any
    pub source: Option<PathBuf>,
}

impl Manifest {
    /// Build the typed model from a parsed TOML document
    ///
    /// Sections or groups that are not tables are kept as empty entries, so
    /// their presence still counts and their missing fields can be reported.
    pub fn from_table(table: &toml::Table) -> Result<Self> {
        let categories = match table.get("categories") {
            None => None,
            Some(toml::Value::Table(entries)) => {
                let mut categories = Vec::with_capacity(entries.len());
                for (name, value) in entries {
                    let key = format!("categories.{}", name);
                    let mut category: CategoryDefinition = deserialize_value(value, &key)?;
                    category.name = name.clone();
                    categories.push(category);
                }
                Some(categories)
            }
            Some(_) => Some(Vec::new()),
        };

        let assets = match table.get("assets") {
            None => None,
            Some(toml::Value::Table(groups)) => Some(
                groups
                    .iter()
                    .map(|(name, value)| match value {
                        toml::Value::Table(group) => AssetGroup::from_table(name, group),
                        _ => AssetGroup::new(name.as_str()),
                    })
                    .collect(),
            ),
            Some(_) => Some(Vec::new()),
        };

        Ok(Manifest {
            meta: section(table, "meta")?,
            categories,
            assets,
            build: section(table, "build")?,
            cli: section(table, "cli")?,
            generation: section(table, "generation")?,
            source: None,
        })
    }

    /// Asset groups in manifest order (empty when `[assets]` is absent)
    pub fn groups(&self) -> &[AssetGroup] {
        self.assets.as_deref().unwrap_or_default()
    }

    pub fn group(&self, name: &str) -> Option<&AssetGroup> {
        self.groups().iter().find(|g| g.name == name)
    }

    /// Serialize back to TOML, flattening assets into their groups
    pub fn to_toml_string(&self) -> Result<String> {
        let mut table = toml::Table::new();

        if let Some(meta) = &self.meta {
            table.insert("meta".to_string(), toml::Value::try_from(meta)?);
        }
        if let Some(categories) = &self.categories {
            let mut entries = toml::Table::new();
            for category in categories {
                entries.insert(category.name.clone(), toml::Value::try_from(category)?);
            }
            table.insert("categories".to_string(), toml::Value::Table(entries));
        }
        if let Some(groups) = &self.assets {
            let mut entries = toml::Table::new();
            for group in groups {
                entries.insert(group.name.clone(), toml::Value::Table(group.to_table()));
            }
            table.insert("assets".to_string(), toml::Value::Table(entries));
        }
        if let Some(build) = &self.build {
            table.insert("build".to_string(), toml::Value::try_from(build)?);
        }
        if let Some(cli) = &self.cli {
            table.insert("cli".to_string(), toml::Value::try_from(cli)?);
        }
        if let Some(generation) = &self.generation {
            table.insert("generation".to_string(), toml::Value::try_from(generation)?);
        }

        Ok(toml::to_string_pretty(&table)?)
    }
}

fn section<T: DeserializeOwned + Default>(table: &toml::Table, key: &str) -> Result<Option<T>> {
    match table.get(key) {
        None => Ok(None),
        Some(value @ toml::Value::Table(_)) => deserialize_value(value, key).map(Some),
        Some(_) => Ok(Some(T::default())),
    }
}

fn deserialize_value<T: DeserializeOwned>(value: &toml::Value, key: &str) -> Result<T> {
    value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| AssetMaxError::TomlParseError(format!("[{}]: {}", key, e)))
}

/// Render a TOML value as plain text: strings verbatim, anything else in TOML syntax
pub(crate) fn scalar_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Manifest {
        let table: toml::Table = toml::from_str(content).unwrap();
        Manifest::from_table(&table).unwrap()
    }

    #[test]
    fn test_group_splits_metadata_from_assets() {
        let manifest = parse(
            r#"
[assets.hero_images]
description = "Hero images"
category = "illustrations"
format = "png"
generation_model = "flux-kontext"
aspect_ratio = "16:9"

[assets.hero_images.main_hero]
prompt = "A wide friendly landscape with rolling hills"
alt = "Main hero"
age_range = "5-8"

[assets.hero_images.draft]
alt = "No prompt yet"
"#,
        );

        let group = manifest.group("hero_images").unwrap();
        assert_eq!(group.category.as_deref(), Some("illustrations"));
        assert_eq!(group.aspect_ratio.as_deref(), Some("16:9"));
        assert_eq!(group.assets.len(), 1);
        assert_eq!(group.assets[0].name, "main_hero");
        assert_eq!(group.assets[0].alt.as_deref(), Some("Main hero"));
        assert_eq!(group.assets[0].field("age_range"), Some("5-8"));
        assert_eq!(group.incomplete.len(), 1);
        assert_eq!(group.incomplete[0].name, "draft");
    }

    #[test]
    fn test_order_is_preserved() {
        let manifest = parse(
            r#"
[assets.zeta]
description = "z"
[assets.zeta.b_asset]
prompt = "second declared first"
alt = "b"
style = "flat"
aspect_ratio = "4:3"
[assets.zeta.a_asset]
prompt = "declared second"
alt = "a"

[assets.alpha]
description = "a"
"#,
        );

        let names: Vec<_> = manifest.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let zeta = manifest.group("zeta").unwrap();
        let assets: Vec<_> = zeta.assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(assets, vec!["b_asset", "a_asset"]);
        assert_eq!(
            zeta.assets[0].fields,
            vec![
                ("style".to_string(), "flat".to_string()),
                ("aspect_ratio".to_string(), "4:3".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        let manifest = parse(
            r#"
[assets.clips]
description = "Clips"
[assets.clips.intro]
prompt = "A short intro animation of the mascot"
alt = "Intro"
duration = 8
"#,
        );
        let intro = &manifest.group("clips").unwrap().assets[0];
        assert_eq!(intro.field("duration"), Some("8"));
    }

    #[test]
    fn test_missing_sections_are_none() {
        let manifest = parse(
            r#"
[meta]
name = "demo"
"#,
        );
        assert!(manifest.meta.is_some());
        assert!(manifest.build.is_none());
        assert!(manifest.cli.is_none());
        assert!(manifest.assets.is_none());
        assert!(manifest.groups().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let manifest = parse(
            r#"
[meta]
name = "demo"
homepage = "https://example.com"

[future_section]
enabled = true

[build]
output_dir = "src/lib"
minify = true
"#,
        );
        assert_eq!(manifest.meta.unwrap().name.as_deref(), Some("demo"));
        assert_eq!(manifest.build.unwrap().output_dir.as_deref(), Some("src/lib"));
    }

    #[test]
    fn test_non_table_entries_are_kept_empty() {
        let manifest = parse(
            r#"
meta = "oops"
categories = 3

[assets]
legacy = "oops"

[assets.icons]
description = "Icons"
"#,
        );
        assert_eq!(manifest.meta, Some(MetaSection::default()));
        assert_eq!(manifest.categories, Some(Vec::new()));

        let names: Vec<_> = manifest.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["legacy", "icons"]);
        assert_eq!(manifest.group("legacy").unwrap(), &AssetGroup::new("legacy"));
    }

    #[test]
    fn test_mistyped_fields_are_read_leniently() {
        let manifest = parse(
            r#"
[meta]
name = "demo"
version = 1

[categories.icons]
type = "audio"
formats = "png"

[build]
output_dir = "src/lib"
type_definitions = "yes"

[cli]
models = "flux-kontext"
output_dir = 7

[generation]
skip_existing = "no"
max_retries = -2
"#,
        );
        let meta = manifest.meta.unwrap();
        assert_eq!(meta.version.as_deref(), Some("1"));

        let category = &manifest.categories.unwrap()[0];
        assert_eq!(category.kind, None);
        assert_eq!(category.formats, vec!["png".to_string()]);

        let build = manifest.build.unwrap();
        assert_eq!(build.output_dir.as_deref(), Some("src/lib"));
        assert_eq!(build.type_definitions, None);

        let cli = manifest.cli.unwrap();
        assert_eq!(cli.models, None);
        assert_eq!(cli.output_dir.as_deref(), Some("7"));

        let generation = manifest.generation.unwrap();
        assert!(generation.skip_existing);
        assert_eq!(generation.max_retries, 3);
    }

    #[test]
    fn test_knows_model() {
        let manifest = parse(
            r#"
[cli.models]
images = "flux-kontext"
[cli.pricing]
"veo-3-fast" = 0.05
"#,
        );
        let cli = manifest.cli.unwrap();
        assert_eq!(cli.knows_model("flux-kontext"), Some(true));
        assert_eq!(cli.knows_model("veo-3-fast"), Some(true));
        assert_eq!(cli.knows_model("dall-e"), Some(false));
        assert_eq!(CliSection::default().knows_model("flux-kontext"), None);
    }

    #[test]
    fn test_pricing_lookup() {
        let manifest = parse(
            r#"
[cli]
output_dir = "public/assets"
[cli.models]
images = "flux-kontext"
[cli.pricing]
"flux-kontext" = 0.015
"veo-3-fast" = 1
"#,
        );
        let cli = manifest.cli.unwrap();
        assert_eq!(cli.price_for("flux-kontext"), 0.015);
        assert_eq!(cli.price_for("veo-3-fast"), 1.0);
        assert_eq!(cli.price_for("unknown"), 0.0);
    }

    #[test]
    fn test_generation_defaults() {
        let manifest = parse("[generation]\nmax_retries = 5\n");
        let generation = manifest.generation.unwrap();
        assert!(generation.skip_existing);
        assert_eq!(generation.max_retries, 5);
    }

    #[test]
    fn test_toml_roundtrip_keeps_group_shape() {
        let source = r#"
[meta]
name = "demo"
version = "1.0.0"

[categories.icons]
path = "icons"
type = "icon"
formats = ["png", "svg"]

[assets.ui_icons]
description = "UI icons"
category = "icons"
format = "png"
generation_model = "flux-kontext"

[assets.ui_icons.home]
prompt = "Simple home icon in flat style"
alt = "Home"
"#;
        let manifest = parse(source);
        let text = manifest.to_toml_string().unwrap();
        let reparsed = parse(&text);

        assert_eq!(reparsed.groups(), manifest.groups());
        assert_eq!(reparsed.categories, manifest.categories);
        assert_eq!(
            reparsed.categories.unwrap()[0].kind,
            Some(CategoryKind::Icon)
        );
    }
}
