//! Validation report types

use serde::Serialize;

/// How much a finding matters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks the `valid` verdict
    Error,
    /// Advisory only
    Warning,
}

/// Outcome of validating one manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub asset_count: usize,
    pub group_count: usize,
}

impl ValidationReport {
    /// Create an empty, valid report
    pub fn new() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    /// Report for a manifest that could not be loaded at all
    pub fn fatal(message: impl std::fmt::Display) -> Self {
        Self {
            valid: false,
            errors: vec![format!("Fatal validation error: {}", message)],
            ..Default::default()
        }
    }

    /// Record a finding; errors clear the `valid` flag
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        match severity {
            Severity::Error => {
                self.errors.push(message.into());
                self.valid = false;
            }
            Severity::Warning => self.warnings.push(message.into()),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let verdict = match (self.errors.is_empty(), self.warnings.is_empty()) {
            (true, true) => "Manifest is valid",
            (true, false) => "Validation passed with warnings",
            (false, _) => "Validation failed",
        };
        format!(
            "{}: {} error(s), {} warning(s), {} asset(s) in {} group(s)",
            verdict,
            self.errors.len(),
            self.warnings.len(),
            self.asset_count,
            self.group_count,
        )
    }
}
