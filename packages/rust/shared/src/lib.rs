//! Shared types, error model, and configuration for WikiCorpus.
//!
//! This crate is the foundation depended on by all other WikiCorpus crates.
//! It provides:
//! - [`WikiCorpusError`] — the unified error type
//! - Domain types ([`Taxonomy`], [`SectionNode`], [`WikiPage`], [`ArticleRecord`], [`Corpus`])
//! - The [`ContentSource`] capability trait
//! - Configuration ([`AppConfig`], [`CorpusOptions`], config loading)

pub mod config;
pub mod error;
pub mod source;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApiConfig, AppConfig, CorpusOptions, DefaultsConfig, FiltersConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, WikiCorpusError};
pub use source::ContentSource;
pub use types::{
    ArticleRecord, CategoryMember, Corpus, MAIN_NAMESPACE, SectionNode, Taxonomy, WikiPage,
};
