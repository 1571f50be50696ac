//! Shared types, error model, and configuration for briefparse.
//!
//! This crate is the foundation depended on by all other briefparse crates.
//! It provides:
//! - [`BriefParseError`], the unified error type
//! - Domain types ([`ProjectRecord`], [`ExtractionResult`], [`OrderedSet`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, NotionConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{BriefParseError, Result};
pub use types::{
    ExtractionMetadata, ExtractionResult, Industry, Language, MAX_DELIVERABLES, MAX_TAGS,
    OrderedSet, Priority, ProjectBatch, ProjectRecord, Status, UNKNOWN_LABEL, UNTITLED_PROJECT,
};
