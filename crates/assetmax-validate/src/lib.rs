//! AssetMax Validate - manifest audit
//!
//! Reports missing sections and fields as errors and questionable prompts or
//! configuration as warnings. Failures never escape the validator; loading
//! problems become a single fatal error in the report.

mod report;
mod validator;

pub use report::{Severity, ValidationReport};
pub use validator::{ManifestValidator, MAX_PROMPT_CHARS, MIN_PROMPT_CHARS};
