use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub output: OutputConfig,
    pub diagrams: DiagramConfig,
    pub server: ServerConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub directory: PathBuf,
}

/// Diagram settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub enabled: bool,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Value for the Access-Control-Allow-Origin response header
    pub allow_origin: String,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    /// Parse a CLI format string
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "json" => Ok(OutputFormat::Json),
            "markdown" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            other => Err(Error::other(format!("Unknown format: {}", other))),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "CodeViz".to_string(),
            description: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory: PathBuf::from("./codeviz-out"),
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allow_origin: "*".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it doesn't exist
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                eprintln!("Warning: failed to load {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge CLI arguments into the config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        format: Option<OutputFormat>,
        no_diagrams: bool,
    ) {
        if let Some(output) = output {
            self.output.directory = output;
        }
        if let Some(format) = format {
            self.output.format = format;
        }
        if no_diagrams {
            self.diagrams.enabled = false;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(Error::config_validation("server.host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(Error::config_validation("server.port must be nonzero"));
        }
        if self.server.allow_origin.is_empty() {
            return Err(Error::config_validation(
                "server.allow_origin must not be empty (use \"*\" to allow any origin)",
            ));
        }
        Ok(())
    }
}
