//! Core pipeline logic.
//!
//! This module contains:
//! - Prompts: the three prompt templates
//! - Titles: parsing the generated title list
//! - Distiller: the sequential generation pipeline

pub mod orchestrator;
pub mod prompts;
pub mod titles;

// Re-export commonly used types
pub use orchestrator::{Distiller, RunRequest, DEFAULT_DOCUMENT_COUNT};
pub use titles::parse_title_list;
