//! Domain types for the distillery pipeline.
//!
//! This module contains:
//! - Document: a generated title/content pair and its filename
//! - OutputFormat: text or YAML runs
//! - RunDirectory / RunReport: where a run writes and what it produced

pub mod document;
pub mod run;

// Re-export commonly used types
pub use document::{sanitize_component, Document, OutputFormat};
pub use run::{FailedDocument, RunDirectory, RunReport, TIMESTAMP_FORMAT};
