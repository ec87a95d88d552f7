//! AssetMax compiler: turns an asset manifest into a TypeScript module
//!
//! ```text
//! asset-manifest.toml ──load──> Manifest ──generate──> assets.ts
//! ```

mod compiler;
mod literal;

pub use compiler::{resolve_output_path, CompileOutcome, ManifestCompiler};
