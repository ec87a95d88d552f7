//! AssetMax Manifest - the asset manifest data model
//!
//! Loads `asset-manifest.toml` into a typed [`Manifest`], and provides the
//! derivation rules (asset paths, aspect ratios, export identifiers) that the
//! compiler, validator, generation planner and asset verifier share.

pub mod derive;
pub mod loader;
pub mod model;
pub mod plan;
pub mod scan;
pub mod verify;

pub use derive::{
    asset_relative_path, count_assets, is_js_identifier, resolve_aspect_ratio, to_camel_case,
    DEFAULT_ASPECT_RATIO,
};
pub use loader::{load_manifest, parse_manifest, DEFAULT_MANIFEST_FILE};
pub use model::{
    AssetConfig, AssetGroup, BuildSection, CategoryDefinition, CategoryKind, CliSection,
    GenerationSettings, IncompleteEntry, Manifest, MetaSection, GROUP_METADATA_KEYS,
};
pub use plan::{GenerationPlan, ModelUsage, PlanOptions, PlannedAsset};
pub use scan::{default_manifest, scan_directory, ScanOptions};
pub use verify::{verify_manifest, verify_path, VerificationReport, VerifyOptions};
