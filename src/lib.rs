//! distillery - RAG reference document generator
//!
//! Prompts a language-model API for a topic title, a list of related
//! document titles, and the full text of each document, then writes the
//! documents into a timestamped run directory.
//!
//! # Pipeline
//!
//! The run is strictly sequential:
//! 1. Topic title from the user's description
//! 2. Document title list (parsed line by line)
//! 3. One content request per title, each written to its own file
//!
//! A failed title or title-list request aborts the run. A failed document
//! is logged and skipped; the remaining documents are still written.
//!
//! # Modules
//!
//! - `adapters`: Provider APIs (Anthropic, OpenAI-compatible) and the HTTP executor
//! - `core`: Prompts, title parsing, the `Distiller` pipeline
//! - `domain`: Documents, output formats, run directories
//! - `config`: Layered configuration
//! - `logging`: Console and log file tracing setup
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Fully interactive
//! distillery
//!
//! # Non-interactive
//! distillery --provider anthropic --topic "how homes can run on sunlight" -n 3
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

// Re-export main types at crate root for convenience
pub use crate::adapters::{Completion, GenerationError, LlmClient, ProviderConfig, ProviderKind};
pub use crate::core::{Distiller, RunRequest};
pub use crate::domain::{Document, OutputFormat, RunDirectory, RunReport};
