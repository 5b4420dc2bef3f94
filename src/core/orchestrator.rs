//! Pipeline driver.
//!
//! Runs the three generation stages in order: topic title, document
//! titles, then one content request per title. Title and title-list
//! failures abort the run; a failed document is logged and skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{error, info, instrument, warn};

use crate::adapters::Completion;
use crate::domain::{Document, FailedDocument, OutputFormat, RunDirectory, RunReport};

use super::prompts::{document_content_prompt, document_titles_prompt, topic_title_prompt};
use super::titles::parse_title_list;

/// Default number of documents per run
pub const DEFAULT_DOCUMENT_COUNT: usize = 5;

/// What the user asked for
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Free-form topic description
    pub topic_prompt: String,

    /// Maximum number of documents to generate
    pub document_count: usize,

    /// Parent directory for the run directory
    pub output_root: PathBuf,
}

/// Main pipeline driver
pub struct Distiller {
    completion: Box<dyn Completion>,
    format: OutputFormat,
}

impl Distiller {
    pub fn new(completion: Box<dyn Completion>, format: OutputFormat) -> Self {
        Self { completion, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Execute the whole pipeline
    #[instrument(skip(self, request), fields(source = %self.completion.name()))]
    pub async fn run(&self, request: &RunRequest) -> Result<RunReport> {
        let topic_title = self.generate_topic_title(&request.topic_prompt).await?;
        let titles = self
            .generate_document_titles(&topic_title, request.document_count)
            .await?;

        let run_dir = RunDirectory::create(
            &request.output_root,
            &topic_title,
            &Local::now(),
            self.format,
        )
        .await?;

        Ok(self.write_documents(&topic_title, &run_dir, &titles).await)
    }

    /// Stage 1: ask for a concise topic title
    pub async fn generate_topic_title(&self, topic_prompt: &str) -> Result<String> {
        let title = self
            .completion
            .complete(&topic_title_prompt(topic_prompt))
            .await
            .context("Failed to generate topic title")?;

        info!(topic_title = %title, "Generated topic title");
        Ok(title)
    }

    /// Stage 2: ask for up to `count` document titles
    pub async fn generate_document_titles(
        &self,
        topic_title: &str,
        count: usize,
    ) -> Result<Vec<String>> {
        let text = self
            .completion
            .complete(&document_titles_prompt(topic_title, count))
            .await
            .context("Failed to generate document titles")?;

        let mut titles = parse_title_list(&text);
        if titles.len() > count {
            info!(received = titles.len(), count, "Truncating title list");
            titles.truncate(count);
        }

        info!(count = titles.len(), "Generated document titles");
        Ok(titles)
    }

    /// Stage 3: ask for the body of one document
    pub async fn generate_document_content(&self, title: &str) -> Result<String> {
        let raw = self
            .completion
            .complete(&document_content_prompt(title, self.format))
            .await
            .with_context(|| format!("Failed to generate content for '{}'", title))?;

        let content = self.format.prepare(&raw);
        if content.is_empty() {
            anyhow::bail!("Model returned empty content for '{}'", title);
        }

        if self.format == OutputFormat::Yaml
            && serde_yaml::from_str::<serde_yaml::Value>(&content).is_err()
        {
            warn!(%title, "Generated content is not valid YAML, writing it anyway");
        }

        Ok(content)
    }

    /// Generate and write every title, continuing past failures
    pub async fn write_documents(
        &self,
        topic_title: &str,
        run_dir: &RunDirectory,
        titles: &[String],
    ) -> RunReport {
        let mut report = RunReport::new(topic_title, run_dir.path().to_path_buf());

        for title in titles {
            if title.trim().is_empty() {
                warn!("Skipping empty title");
                report.skipped += 1;
                continue;
            }

            match self.write_document(run_dir, title).await {
                Ok(path) if report.written.contains(&path) => {
                    warn!(
                        %title,
                        path = %path.display(),
                        "Document overwrote an earlier one with the same file name"
                    );
                }
                Ok(path) => {
                    info!(path = %path.display(), "Generated document");
                    report.written.push(path);
                }
                Err(e) => {
                    let message = format!("{:#}", e);
                    error!(%title, error = %message, "Error generating document");
                    report.failed.push(FailedDocument {
                        title: title.clone(),
                        error: message,
                    });
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            skipped = report.skipped,
            directory = %report.directory.display(),
            "Run finished"
        );
        report
    }

    async fn write_document(&self, run_dir: &RunDirectory, title: &str) -> Result<PathBuf> {
        let content = self.generate_document_content(title).await?;
        run_dir.write(&Document::new(title, content)).await
    }
}
