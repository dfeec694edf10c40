use crate::core::model::BracketLayout;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Where each table of the price sheet is published.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcesConfig {
    pub status: Option<String>,
    pub duration_brackets: String,
    pub rates: String,
    pub extras: String,
    pub shortform: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RetrievalConfig {
    /// Additional attempts after the first one fails
    #[serde(default = "RetrievalConfig::default_retries")]
    pub retries: usize,
    #[serde(default = "RetrievalConfig::default_delay_ms")]
    pub delay_ms: u64,
}

impl RetrievalConfig {
    fn default_retries() -> usize {
        2
    }

    fn default_delay_ms() -> u64 {
        200
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        RetrievalConfig {
            retries: Self::default_retries(),
            delay_ms: Self::default_delay_ms(),
        }
    }
}

/// Labels and constants the quote engine keys its special cases on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PricingRules {
    pub bracket_layout: BracketLayout,
    /// Duration choice meaning "too long, ask for a quote".
    pub inquiry_sentinel: String,
    /// Bracket labels containing this text are never priced automatically.
    pub inquiry_marker: String,
    /// The two rush tiers; only one may be active at a time.
    pub rush_labels: [String; 2],
    pub moment_label: String,
    /// Price per moment when the sheet does not define the moment extra.
    pub moment_unit_default: f64,
    pub moment_max: u32,
    pub collab_label: String,
    /// Participants covered by the base price.
    pub collab_included: u32,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            bracket_layout: BracketLayout::ByLabel,
            inquiry_sentinel: "__inquiry__".to_string(),
            inquiry_marker: "문의".to_string(),
            rush_labels: ["빠른 마감".to_string(), "우선 마감".to_string()],
            moment_label: "시점 추가".to_string(),
            moment_unit_default: 30000.0,
            moment_max: 99,
            collab_label: "합방 인원 추가".to_string(),
            collab_included: 3,
        }
    }
}

/// Human readable names shown in summaries in place of raw ids.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub packages: HashMap<String, String>,
    #[serde(default)]
    pub edit_points: HashMap<String, String>,
}

impl DisplayConfig {
    pub fn package_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.packages.get(id).map_or(id, String::as_str)
    }

    pub fn edit_point_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.edit_points.get(id).map_or(id, String::as_str)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub sources: SourcesConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub pricing: PricingRules,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "editquote", "editquote")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
