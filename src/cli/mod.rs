//! Command-line interface for distillery.
//!
//! Every input can be passed as a flag; anything missing is asked for
//! interactively on stdin.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::adapters::{LlmClient, ProviderConfig, ProviderKind};
use crate::config::ResolvedConfig;
use crate::core::{Distiller, RunRequest};
use crate::domain::{OutputFormat, RunReport};

pub mod prompt;

pub use prompt::Prompter;

/// distillery - Generate RAG reference documents from an LLM
#[derive(Parser, Debug)]
#[command(name = "distillery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API provider (asked interactively if omitted)
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model name (provider default if omitted or empty)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Topic description (asked interactively if omitted)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Number of documents to generate
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Output format of the generated documents
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Parent directory for the run directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Directory for generation logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Provider for CLI (maps to ProviderKind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// Anthropic Messages API
    Anthropic,

    /// OpenAI-compatible chat completions (OpenWebUI)
    #[value(alias = "openwebui")]
    Openai,
}

impl From<ProviderArg> for ProviderKind {
    fn from(p: ProviderArg) -> Self {
        match p {
            ProviderArg::Anthropic => ProviderKind::Anthropic,
            ProviderArg::Openai => ProviderKind::OpenAi,
        }
    }
}

/// Output format for CLI (maps to OutputFormat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plain text documents (.txt)
    Txt,

    /// YAML documents (.yaml)
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Txt => OutputFormat::Text,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Everything a run needs, after flags, prompts and config are merged
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub format: OutputFormat,
    pub request: RunRequest,
}

impl Cli {
    /// Log directory, with the flag taking precedence over config
    pub fn log_dir(&self, config: &ResolvedConfig) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| config.log_dir.clone())
    }

    /// Merge flags with config, prompting for anything missing
    pub fn resolve_options<R: BufRead, W: Write>(
        &self,
        config: &ResolvedConfig,
        prompter: &mut Prompter<R, W>,
    ) -> Result<RunOptions> {
        let provider = match self.provider {
            Some(p) => p.into(),
            None => prompter.ask_provider()?,
        };

        let model = match self.model {
            Some(ref m) => Some(m.clone()),
            None => {
                let default_model = &config.provider(provider).model;
                prompter.ask_optional(&format!("Model name [{}]: ", default_model))?
            }
        };

        let topic_prompt = match self.topic {
            Some(ref t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => prompter.ask_required("Enter a topic prompt: ")?,
        };

        let document_count = match self.count {
            Some(0) => anyhow::bail!("--count must be at least 1"),
            Some(n) => n,
            None => prompter.ask_count(config.document_count)?,
        };

        let output_root = self
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.clone());

        Ok(RunOptions {
            provider,
            model,
            format: self.format.map(Into::into).unwrap_or(config.format),
            request: RunRequest {
                topic_prompt,
                document_count,
                output_root,
            },
        })
    }

    /// Execute the CLI command
    pub async fn execute(self, config: &ResolvedConfig, log_file: &Path) -> Result<()> {
        let options = {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            self.resolve_options(config, &mut prompter)?
        };

        let provider_config = ProviderConfig::resolve(
            options.provider,
            config.provider(options.provider),
            options.model.as_deref(),
        )
        .with_context(|| format!("Failed to configure provider '{}'", options.provider))?;

        tracing::info!(
            provider = %provider_config.kind,
            model = %provider_config.model,
            log_file = %log_file.display(),
            "Starting generation run"
        );

        let distiller = Distiller::new(Box::new(LlmClient::new(provider_config)), options.format);
        let report = distiller.run(&options.request).await?;
        print_report(&report);

        Ok(())
    }
}

fn print_report(report: &RunReport) {
    println!("Topic: {}", report.topic_title);
    for path in &report.written {
        println!("Generated document: {}", path.display());
    }

    println!(
        "\n[{} written, {} failed, {} skipped → {}]",
        report.written.len(),
        report.failed.len(),
        report.skipped,
        report.directory.display()
    );

    for failed in &report.failed {
        eprintln!("  failed: {} ({})", failed.title, failed.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_flags_skip_prompts() {
        let cli = Cli::try_parse_from([
            "distillery",
            "--provider",
            "openwebui",
            "--model",
            "mistral",
            "--topic",
            "Solar Energy",
            "-n",
            "2",
            "--format",
            "yaml",
            "--output-dir",
            "/tmp/out",
        ])
        .unwrap();

        // No input available: any prompt would fail
        let options = cli
            .resolve_options(&ResolvedConfig::default(), &mut prompter(""))
            .unwrap();

        assert_eq!(options.provider, ProviderKind::OpenAi);
        assert_eq!(options.model.as_deref(), Some("mistral"));
        assert_eq!(options.format, OutputFormat::Yaml);
        assert_eq!(options.request.topic_prompt, "Solar Energy");
        assert_eq!(options.request.document_count, 2);
        assert_eq!(options.request.output_root, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_interactive_prompts() {
        let cli = Cli::try_parse_from(["distillery"]).unwrap();
        let mut p = prompter("1\n\nhow homes run on sunlight\n\n");

        let config = ResolvedConfig {
            output_dir: PathBuf::from("/srv/rag"),
            ..ResolvedConfig::default()
        };
        let options = cli.resolve_options(&config, &mut p).unwrap();

        assert_eq!(options.provider, ProviderKind::Anthropic);
        assert_eq!(options.model, None);
        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.request.topic_prompt, "how homes run on sunlight");
        assert_eq!(options.request.document_count, 5);
        assert_eq!(options.request.output_root, PathBuf::from("/srv/rag"));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("Model name [claude-3-sonnet-20240229]: "));
    }

    #[test]
    fn test_zero_count_flag_rejected() {
        let cli = Cli::try_parse_from(["distillery", "-p", "anthropic", "-m", "", "-t", "x", "-n", "0"])
            .unwrap();
        assert!(cli
            .resolve_options(&ResolvedConfig::default(), &mut prompter(""))
            .is_err());
    }

    #[test]
    fn test_log_dir_precedence() {
        let config = ResolvedConfig::default();

        let cli = Cli::try_parse_from(["distillery", "--log-dir", "/tmp/logs"]).unwrap();
        assert_eq!(cli.log_dir(&config), PathBuf::from("/tmp/logs"));
    }
}
