//! Corpus building logic for WikiCorpus.
//!
//! This crate ties the section filter, the per-category quota policy, and the
//! output writers into one build (`builder::build_corpus`). It never reads
//! configuration itself; callers pass [`wikicorpus_shared::CorpusOptions`].

pub mod builder;
pub mod output;
pub mod progress;
pub mod section_filter;
pub mod taxonomy;

pub use builder::{BuildResult, build_corpus, extract_article};
pub use output::{OutputFormat, save_corpus, write_corpus};
pub use progress::{ProgressReporter, SilentProgress};
pub use taxonomy::load_taxonomy;
