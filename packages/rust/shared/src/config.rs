//! Application configuration for WikiCorpus.
//!
//! User config lives at `~/.wikicorpus/wikicorpus.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikiCorpusError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "wikicorpus.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".wikicorpus";

/// Placeholder replaced by the language code in [`ApiConfig::endpoint`].
pub const LANG_PLACEHOLDER: &str = "{lang}";

// ---------------------------------------------------------------------------
// Config structs (matching wikicorpus.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults for a corpus run.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Section and title filters.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// MediaWiki API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// ISO-639-1 language code of the wiki to read from.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Maximum accepted articles per category.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,

    /// Left slice offset applied to each article's text, in characters.
    #[serde(default)]
    pub min_article_length: usize,

    /// Right slice cutoff applied to each article's text, in characters.
    #[serde(default = "default_max_article_length")]
    pub max_article_length: usize,

    /// Output format selector ("json" or "csv").
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Directory the output artifact is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            max_articles: default_max_articles(),
            min_article_length: 0,
            max_article_length: default_max_article_length(),
            output_format: default_output_format(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_lang() -> String {
    "de".into()
}
fn default_max_articles() -> usize {
    1000
}
fn default_max_article_length() -> usize {
    10_000
}
fn default_output_format() -> String {
    "json".into()
}
fn default_output_dir() -> String {
    ".".into()
}

/// `[filters]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Section titles dropped (with their subsections) from every article.
    #[serde(default = "default_excluded_sections")]
    pub excluded_sections: Vec<String>,

    /// Title substrings marking "list of ..." pages, which are never collected.
    #[serde(default = "default_list_markers")]
    pub list_markers: Vec<String>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            excluded_sections: default_excluded_sections(),
            list_markers: default_list_markers(),
        }
    }
}

fn default_excluded_sections() -> Vec<String> {
    [
        "Literatur",
        "Weblinks",
        "Einzelnachweis",
        "Einzelnachweise",
        "Siehe auch",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_list_markers() -> Vec<String> {
    vec!["Liste von".into(), "Liste d".into()]
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Action API endpoint; `{lang}` is replaced by the language code.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_endpoint() -> String {
    "https://{lang}.wikipedia.org/w/api.php".into()
}
fn default_user_agent() -> String {
    concat!("WikiCorpus/", env!("CARGO_PKG_VERSION")).into()
}

impl ApiConfig {
    /// Endpoint URL for the given language code.
    pub fn endpoint_for(&self, lang: &str) -> String {
        self.endpoint.replace(LANG_PLACEHOLDER, lang)
    }
}

// ---------------------------------------------------------------------------
// Corpus options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime options for one corpus build, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    /// Section titles excluded with their whole subtree (exact match).
    pub excluded_sections: HashSet<String>,
    /// Title substrings identifying list pages (case-sensitive).
    pub list_markers: Vec<String>,
    /// Maximum accepted articles per category.
    pub max_articles: usize,
    /// Start offset of the kept character window.
    pub min_article_length: usize,
    /// End offset (exclusive) of the kept character window.
    pub max_article_length: usize,
}

impl From<&AppConfig> for CorpusOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            excluded_sections: config.filters.excluded_sections.iter().cloned().collect(),
            list_markers: config.filters.list_markers.clone(),
            max_articles: config.defaults.max_articles,
            min_article_length: config.defaults.min_article_length,
            max_article_length: config.defaults.max_article_length,
        }
    }
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.wikicorpus/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WikiCorpusError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.wikicorpus/wikicorpus.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WikiCorpusError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WikiCorpusError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| WikiCorpusError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| WikiCorpusError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| WikiCorpusError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
