//! Generated documents and their on-disk naming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A generated document, held in memory until it is written once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub content: String,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// File name for this document, e.g. `Photovoltaic_Cells-_Basics.txt`
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", sanitize_component(&self.title), format.extension())
    }
}

/// Make a title safe to use as a single path component
///
/// Spaces become underscores; colons and path separators become hyphens.
pub fn sanitize_component(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            ':' | '/' | '\\' => '-',
            other => other,
        })
        .collect()
}

/// Output flavour of a run, fixing the file extension and content prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Plain prose, `.txt`
    #[default]
    #[serde(rename = "txt", alias = "text")]
    Text,

    /// Structured YAML documents, `.yaml`
    #[serde(rename = "yaml", alias = "yml")]
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Clean up raw model output before it is written
    ///
    /// Models like to wrap YAML in a Markdown fence; the fence is dropped.
    pub fn prepare(&self, content: &str) -> String {
        match self {
            OutputFormat::Text => content.trim().to_string(),
            OutputFormat::Yaml => strip_code_fence(content).to_string(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (```yaml) on the opening line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => trimmed,
    }
}
