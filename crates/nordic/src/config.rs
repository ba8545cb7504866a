use anyhow::{Context, Result};
use nordic_processor::{Mode, SanitizeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG: &str = "nordic-extract.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<PathBuf>,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default = "default_strip_tags")]
    pub strip_tags: Vec<String>,

    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            alphabet: None,
            mode: Mode::default(),
            strip_tags: default_strip_tags(),
            output_prefix: default_output_prefix(),
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("live.db")
}

fn default_strip_tags() -> Vec<String> {
    SanitizeOptions::default().strip_tags
}

fn default_output_prefix() -> String {
    "narrative_doc_".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn load_from_project() -> Result<Option<Self>> {
        let path = Path::new(PROJECT_CONFIG);
        if path.exists() {
            return Ok(Some(Self::load(path)?));
        }
        Ok(None)
    }

    /// An explicit file must exist; otherwise the project file, otherwise defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::load_from_project()?.unwrap_or_default()),
        }
    }

    pub fn sanitize_options(&self) -> SanitizeOptions {
        SanitizeOptions {
            strip_tags: self.strip_tags.clone(),
        }
    }
}
