//! The run directory and the summary of what a run produced.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use tokio::fs;

use super::document::{sanitize_component, Document, OutputFormat};

/// Timestamp layout shared by run directories and log files
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Folder receiving every document of one run
#[derive(Debug, Clone)]
pub struct RunDirectory {
    path: PathBuf,
    format: OutputFormat,
}

impl RunDirectory {
    /// Directory name: `<timestamp>_<sanitized topic>`
    pub fn folder_name<Tz>(topic_title: &str, timestamp: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let topic = sanitize_component(topic_title);
        let topic = if topic.is_empty() { "untitled".to_string() } else { topic };
        format!("{}_{}", timestamp.format(TIMESTAMP_FORMAT), topic)
    }

    /// Create the run directory under `root`
    pub async fn create<Tz>(
        root: &Path,
        topic_title: &str,
        timestamp: &DateTime<Tz>,
        format: OutputFormat,
    ) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let path = root.join(Self::folder_name(topic_title, timestamp));
        fs::create_dir_all(&path)
            .await
            .with_context(|| format!("Failed to create run directory: {}", path.display()))?;

        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a document as the full body of its own file
    pub async fn write(&self, document: &Document) -> Result<PathBuf> {
        let file_path = self.path.join(document.file_name(self.format));
        fs::write(&file_path, document.content.as_bytes())
            .await
            .with_context(|| format!("Failed to write document: {}", file_path.display()))?;

        Ok(file_path)
    }
}

/// A title whose document could not be produced
#[derive(Debug, Clone)]
pub struct FailedDocument {
    pub title: String,
    pub error: String,
}

/// Outcome of the document-writing stage
#[derive(Debug, Clone)]
pub struct RunReport {
    pub topic_title: String,
    pub directory: PathBuf,
    pub written: Vec<PathBuf>,
    pub failed: Vec<FailedDocument>,
    pub skipped: usize,
}

impl RunReport {
    pub fn new(topic_title: impl Into<String>, directory: PathBuf) -> Self {
        Self {
            topic_title: topic_title.into(),
            directory,
            written: Vec::new(),
            failed: Vec::new(),
            skipped: 0,
        }
    }

    /// True when every requested document was written
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
