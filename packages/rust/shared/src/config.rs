//! Application configuration for kbforge.
//!
//! User config lives at `~/.kbforge/kbforge.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KbForgeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "kbforge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".kbforge";

// ---------------------------------------------------------------------------
// Config structs (matching kbforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Pipeline behavior toggles.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Machine-translation settings.
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Input sources beyond the document directory.
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory scanned for input documents.
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Path of the JSON snapshot to write.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_path: default_output_path(),
        }
    }
}

fn default_input_dir() -> String {
    "documents".into()
}
fn default_output_path() -> String {
    "out/knowledge.json".into()
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Extraction mode: "qa" or "content".
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Whether to run the translation gate.
    #[serde(default = "default_true")]
    pub translate: bool,

    /// Whether to suppress duplicate records.
    #[serde(default = "default_true")]
    pub deduplicate: bool,

    /// Whether to repair glued words in flowing text.
    #[serde(default = "default_true")]
    pub fix_spacing: bool,

    /// Whether to read h2/h3 elements from web pages in addition to p/li.
    #[serde(default)]
    pub include_headings: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            translate: true,
            deduplicate: true,
            fix_spacing: true,
            include_headings: false,
        }
    }
}

fn default_mode() -> String {
    "qa".into()
}
fn default_true() -> bool {
    true
}

/// `[translator]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Translation endpoint (LibreTranslate-compatible `POST /translate`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Language translated from.
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    /// Language translated into.
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
        }
    }
}

fn default_endpoint() -> String {
    "https://libretranslate.com/translate".into()
}
fn default_api_key_env() -> String {
    "KBFORGE_TRANSLATE_KEY".into()
}
fn default_source_lang() -> String {
    "en".into()
}
fn default_target_lang() -> String {
    "pt".into()
}

/// `[sources]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Web pages fetched after the document directory, in order.
    #[serde(default)]
    pub urls: Vec<String>,
}

// ---------------------------------------------------------------------------
// Build options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build options, merged from config file and CLI flags.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory scanned for input documents.
    pub input_dir: PathBuf,
    /// Path of the JSON snapshot to write.
    pub output_path: PathBuf,
    /// Web pages to fetch, in order.
    pub urls: Vec<String>,
    /// Extraction mode: "qa" or "content".
    pub mode: String,
    /// Whether to run the translation gate.
    pub translate: bool,
    /// Whether to suppress duplicate records.
    pub deduplicate: bool,
    /// Whether to repair glued words in flowing text.
    pub fix_spacing: bool,
    /// Whether to read h2/h3 elements from web pages.
    pub include_headings: bool,
}

impl From<&AppConfig> for BuildOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            input_dir: PathBuf::from(&config.defaults.input_dir),
            output_path: PathBuf::from(&config.defaults.output_path),
            urls: config.sources.urls.clone(),
            mode: config.pipeline.mode.clone(),
            translate: config.pipeline.translate,
            deduplicate: config.pipeline.deduplicate,
            fix_spacing: config.pipeline.fix_spacing,
            include_headings: config.pipeline.include_headings,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.kbforge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| KbForgeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.kbforge/kbforge.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| KbForgeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| KbForgeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| KbForgeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| KbForgeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| KbForgeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the translator API key from the configured env var, if set.
///
/// The key is optional. Public LibreTranslate instances accept unauthenticated
/// requests, so an unset or empty var simply omits the key from requests.
pub fn translator_api_key(config: &AppConfig) -> Option<String> {
    match std::env::var(&config.translator.api_key_env) {
        Ok(val) if !val.is_empty() => Some(val),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("input_dir"));
        assert!(toml_str.contains("libretranslate.com"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.output_path, "out/knowledge.json");
        assert_eq!(parsed.translator.source_lang, "en");
        assert_eq!(parsed.translator.target_lang, "pt");
        assert!(parsed.pipeline.translate);
    }

    #[test]
    fn absent_sections_use_defaults() {
        let toml_str = r#"
[defaults]
input_dir = "/srv/docs"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.input_dir, "/srv/docs");
        assert_eq!(config.defaults.output_path, "out/knowledge.json");
        assert_eq!(config.pipeline.mode, "qa");
        assert!(config.sources.urls.is_empty());
    }

    #[test]
    fn config_with_urls() {
        let toml_str = r#"
[sources]
urls = ["https://example.com/faq", "https://example.com/help"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.sources.urls.len(), 2);
        assert_eq!(config.sources.urls[0], "https://example.com/faq");
    }

    #[test]
    fn build_options_from_app_config() {
        let app = AppConfig::default();
        let opts = BuildOptions::from(&app);
        assert_eq!(opts.input_dir, PathBuf::from("documents"));
        assert_eq!(opts.mode, "qa");
        assert!(opts.deduplicate);
        assert!(!opts.include_headings);
    }

    #[test]
    fn missing_api_key_is_none() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.translator.api_key_env = "KBFORGE_TEST_NONEXISTENT_KEY_12345".into();
        assert!(translator_api_key(&config).is_none());
    }
}
