//! Configuration for distillery runs.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (DISTILLERY_OUTPUT_DIR, DISTILLERY_LOG_DIR)
//! 2. Config file (.distillery/config.yaml, then ~/.config/distillery/config.yaml)
//! 3. Defaults (output to ./, logs to ./logs)
//!
//! Config file discovery:
//! - Searches current directory and parents for .distillery/config.yaml
//! - Falls back to the user config directory
//! - Paths in config file are relative to the directory holding .distillery/
//!
//! Credentials never live in the config file; only the name of the
//! environment variable holding them can be changed.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::{ProviderKind, ProviderSettings};
use crate::core::DEFAULT_DOCUMENT_COUNT;
use crate::domain::OutputFormat;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const OUTPUT_DIR_ENV: &str = "DISTILLERY_OUTPUT_DIR";
pub const LOG_DIR_ENV: &str = "DISTILLERY_LOG_DIR";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    pub anthropic: Option<ProviderOverrides>,
    #[serde(alias = "openwebui")]
    pub openai: Option<ProviderOverrides>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderOverrides {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Parent directory for run directories
    pub dir: Option<String>,
    pub format: Option<OutputFormat>,
    pub document_count: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsConfig {
    pub dir: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub anthropic: ProviderSettings,
    pub openai: ProviderSettings,
    /// Parent directory for run directories
    pub output_dir: PathBuf,
    /// Directory for generation logs
    pub log_dir: PathBuf,
    pub format: OutputFormat,
    pub document_count: usize,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Settings for a provider
    pub fn provider(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::OpenAi => &self.openai,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            anthropic: ProviderSettings::defaults(ProviderKind::Anthropic),
            openai: ProviderSettings::defaults(ProviderKind::OpenAi),
            output_dir: PathBuf::from("."),
            log_dir: PathBuf::from("logs"),
            format: OutputFormat::default(),
            document_count: DEFAULT_DOCUMENT_COUNT,
            config_file: None,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".distillery").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("distillery").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Directory that relative paths in a config file resolve against
///
/// For `<root>/.distillery/config.yaml` this is `<root>`; for a user-level
/// `~/.config/distillery/config.yaml` it is the current directory.
fn config_base_dir(config_path: &Path) -> PathBuf {
    let parent = config_path.parent();
    let is_project_file = parent
        .and_then(Path::file_name)
        .is_some_and(|name| name == ".distillery");

    if is_project_file {
        parent
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        PathBuf::from(".")
    }
}

fn apply_overrides(
    mut settings: ProviderSettings,
    overrides: Option<&ProviderOverrides>,
) -> ProviderSettings {
    let Some(overrides) = overrides else {
        return settings;
    };

    if let Some(ref endpoint) = overrides.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(ref model) = overrides.model {
        settings.model = model.clone();
    }
    if overrides.max_tokens.is_some() {
        settings.max_tokens = overrides.max_tokens;
    }
    if let Some(ref env) = overrides.api_key_env {
        settings.api_key_env = env.clone();
    }
    settings
}

/// Merge a parsed config file and environment lookups over the defaults
fn build_config(
    file: Option<(PathBuf, ConfigFile)>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();

    if let Some((path, file)) = file {
        let base_dir = config_base_dir(&path);

        config.anthropic = apply_overrides(config.anthropic, file.providers.anthropic.as_ref());
        config.openai = apply_overrides(config.openai, file.providers.openai.as_ref());

        if let Some(ref dir) = file.output.dir {
            config.output_dir = resolve_path(&base_dir, dir);
        }
        if let Some(format) = file.output.format {
            config.format = format;
        }
        if let Some(count) = file.output.document_count {
            if count == 0 {
                anyhow::bail!("output.document_count must be at least 1 in {}", path.display());
            }
            config.document_count = count;
        }
        if let Some(ref dir) = file.logs.dir {
            config.log_dir = resolve_path(&base_dir, dir);
        }

        config.config_file = Some(path);
    }

    if let Some(dir) = env(OUTPUT_DIR_ENV) {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(dir) = env(LOG_DIR_ENV) {
        config.log_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let file = match find_config_file() {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    build_config(file, &|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
