//! Shared types, error model, and configuration for kbforge.
//!
//! This crate is the foundation depended on by all other kbforge crates.
//! It provides:
//! - [`KbForgeError`], the unified error type
//! - Domain types ([`KnowledgeRecord`], [`QaPair`], [`ContentBlock`], [`RunManifest`])
//! - Configuration ([`AppConfig`], [`BuildOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildOptions, DefaultsConfig, PipelineConfig, SourcesConfig, TranslatorConfig,
    config_dir, config_file_path, init_config, load_config, load_config_from, translator_api_key,
};
pub use error::{KbForgeError, Result};
pub use types::{ContentBlock, KnowledgeRecord, QaPair, RunId, RunManifest, SourceCount};
