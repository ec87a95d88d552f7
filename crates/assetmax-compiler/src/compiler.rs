//! Manifest to TypeScript compiler
//!
//! Emits, in order: header comment, base constants, one export per asset
//! group, the `AssetDefinition` interface and the `ASSET_MANIFEST` metadata.

use crate::literal::{comment_text, property_key, quote, template};
use assetmax_core::{AssetMaxError, Clock, Result, SystemClock};
use assetmax_manifest::{
    asset_relative_path, count_assets, load_manifest, resolve_aspect_ratio, to_camel_case,
    AssetConfig, AssetGroup, Manifest, DEFAULT_MANIFEST_FILE,
};
use std::fs;
use std::path::{Path, PathBuf};

/// What a successful compile wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    pub output_path: PathBuf,
    pub total_assets: usize,
    pub group_count: usize,
}

/// Compiles manifests into typed asset definitions
#[derive(Debug, Clone, Default)]
pub struct ManifestCompiler<C = SystemClock> {
    clock: C,
}

impl ManifestCompiler<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ManifestCompiler<C> {
    /// Compiler that timestamps output with the given clock
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Load `input`, generate, and write to `output` or the manifest's build target
    pub fn compile<P: AsRef<Path>>(
        &self,
        input: P,
        output: Option<&Path>,
    ) -> Result<CompileOutcome> {
        let manifest = load_manifest(input)?;
        self.compile_manifest(&manifest, output)
    }

    /// Generate and write an already loaded manifest
    pub fn compile_manifest(
        &self,
        manifest: &Manifest,
        output: Option<&Path>,
    ) -> Result<CompileOutcome> {
        let output_path = resolve_output_path(manifest, output)?;
        let content = self.generate(manifest);
        write_output(&output_path, &content)?;

        let outcome = CompileOutcome {
            output_path,
            total_assets: count_assets(manifest),
            group_count: manifest.groups().len(),
        };
        tracing::info!(
            path = %outcome.output_path.display(),
            assets = outcome.total_assets,
            groups = outcome.group_count,
            "compiled manifest"
        );
        Ok(outcome)
    }

    /// Generate the full TypeScript source for a manifest
    pub fn generate(&self, manifest: &Manifest) -> String {
        let mut out = Emitter::default();
        self.emit_header(&mut out, manifest);
        emit_constants(&mut out, manifest);
        for group in manifest.groups() {
            emit_group(&mut out, group);
        }
        emit_type_definitions(&mut out);
        self.emit_manifest_metadata(&mut out, manifest);
        out.finish()
    }

    fn emit_header(&self, out: &mut Emitter, manifest: &Manifest) {
        let source = manifest
            .source
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_MANIFEST_FILE);
        let meta = manifest.meta.as_ref();
        let name = meta.and_then(|m| m.name.as_deref()).unwrap_or_default();
        let version = meta.and_then(|m| m.version.as_deref()).unwrap_or_default();

        out.line("/**");
        out.line(" * Generated Asset Definitions");
        out.line(" *");
        out.line(format!(" * This file is auto-generated from {}", comment_text(source)));
        out.line(" * DO NOT EDIT MANUALLY - Changes will be overwritten");
        out.line(" *");
        out.line(format!(" * Generated: {}", self.clock.timestamp()));
        out.line(format!(" * Manifest: {} v{}", comment_text(name), comment_text(version)));
        out.line(" */");
        out.blank();
    }

    fn emit_manifest_metadata(&self, out: &mut Emitter, manifest: &Manifest) {
        let meta = manifest.meta.clone().unwrap_or_default();
        let text = |v: Option<String>| quote(&v.unwrap_or_default());

        out.line("// Manifest Metadata");
        out.line("export const ASSET_MANIFEST = {");
        out.line(format!("  name: {},", text(meta.name)));
        out.line(format!("  version: {},", text(meta.version)));
        out.line(format!("  description: {},", text(meta.description)));
        out.line(format!("  generatedAt: {},", quote(&self.clock.timestamp())));
        out.line(format!("  totalAssets: {}", count_assets(manifest)));
        out.line("};");
    }
}

fn emit_constants(out: &mut Emitter, manifest: &Manifest) {
    let base_url = manifest
        .meta
        .as_ref()
        .and_then(|m| m.base_url.as_deref())
        .unwrap_or_default();
    let fallback = manifest
        .build
        .as_ref()
        .and_then(|b| b.fallback_image.as_deref())
        .unwrap_or_default();

    out.line("// Asset base paths");
    out.line(format!("const ASSET_BASE = {};", quote(base_url)));
    out.line(format!("const PLACEHOLDER_IMAGE = {};", quote(fallback)));
    out.blank();
}

fn emit_group(out: &mut Emitter, group: &AssetGroup) {
    out.line("/**");
    out.line(format!(" * {}", comment_text(group.description.as_deref().unwrap_or_default())));
    out.line(" */");
    out.line(format!("export const {} = {{", to_camel_case(&group.name)));
    for asset in &group.assets {
        emit_asset(out, group, asset);
    }
    out.line("};");
    out.blank();
}

fn emit_asset(out: &mut Emitter, group: &AssetGroup, asset: &AssetConfig) {
    let path = asset_relative_path(group, &asset.name);

    out.line(format!("  {}: {{", property_key(&to_camel_case(&asset.name))));
    out.line(format!("    src: `${{ASSET_BASE}}/{}`,", template(&path)));
    out.line("    fallback: PLACEHOLDER_IMAGE,");
    out.line(format!("    alt: {},", quote(asset.alt.as_deref().unwrap_or_default())));
    for (key, value) in &asset.fields {
        out.line(format!("    {}: {},", property_key(&to_camel_case(key)), quote(value)));
    }

    let meta = |v: &Option<String>| quote(v.as_deref().unwrap_or_default());
    out.line("    _meta: {");
    out.line(format!("      prompt: `{}`,", template(&asset.prompt)));
    out.line(format!("      model: {},", meta(&group.generation_model)));
    out.line(format!("      aspectRatio: {},", quote(resolve_aspect_ratio(group, asset))));
    out.line(format!("      category: {},", meta(&group.category)));
    out.line(format!("      subcategory: {},", meta(&group.subcategory)));
    out.line(format!("      format: {}", meta(&group.format)));
    out.line("    }");
    out.line("  },");
}

fn emit_type_definitions(out: &mut Emitter) {
    for line in [
        "// Type Definitions",
        "export interface AssetDefinition {",
        "  src: string;",
        "  fallback: string;",
        "  alt: string;",
        "  ageRange?: string;",
        "  style?: string;",
        "  category?: string;",
        "  duration?: number;",
        "  aspectRatio?: string;",
        "  _meta: {",
        "    prompt: string;",
        "    model: string;",
        "    aspectRatio: string;",
        "    category: string;",
        "    subcategory: string;",
        "    format: string;",
        "  };",
        "}",
    ] {
        out.line(line);
    }
    out.blank();
}

/// Caller override, else `build.output_dir`/`build.output_file`
pub fn resolve_output_path(manifest: &Manifest, output: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.to_path_buf());
    }

    let build = manifest.build.as_ref();
    let field = |name: &str, value: Option<&String>| {
        value
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| AssetMaxError::MissingRequiredField(format!("build.{}", name)))
    };
    let dir = field("output_dir", build.and_then(|b| b.output_dir.as_ref()))?;
    let file = field("output_file", build.and_then(|b| b.output_file.as_ref()))?;
    Ok(Path::new(&dir).join(file))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    let failure = |source| AssetMaxError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(failure)?;
    }
    fs::write(path, content).map_err(failure)
}

#[derive(Default)]
struct Emitter {
    lines: Vec<String>,
}

impl Emitter {
    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
