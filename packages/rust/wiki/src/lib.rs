//! MediaWiki content source for WikiCorpus.
//!
//! This crate provides:
//! - [`WikiClient`] — Action API client implementing [`wikicorpus_shared::ContentSource`]
//! - [`parse_extract`] — splits a plain-text extract into summary + section tree

mod client;
pub mod sections;

pub use client::WikiClient;
pub use sections::parse_extract;
