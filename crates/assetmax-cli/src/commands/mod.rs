//! CLI command implementations

pub mod build;
pub mod compile;
pub mod plan;
pub mod scan;
pub mod validate;
pub mod verify;
