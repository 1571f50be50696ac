//! Failure-bounded extraction entry points and the post-processing that runs
//! over their results.
//!
//! - [`pipeline`]: URL / webhook / text / email entry points and aggregation
//! - [`aggregate`]: combining results from several sources
//! - [`validate`]: independent per-record quality report
//! - [`stats`]: field coverage and label distributions
//! - [`export`]: CSV serialization

pub mod aggregate;
pub mod export;
pub mod pipeline;
pub mod stats;
pub mod validate;

pub use aggregate::{
    AggregateMetadata, AggregateResult, SavedResult, SourceDescriptor, SourceKind, combine,
};
pub use export::{CSV_COLUMNS, LIST_SEPARATOR, export_csv, write_csv};
pub use pipeline::{BriefParser, EMAIL_SOURCE, NOTION_SOURCE, TEXT_SOURCE};
pub use stats::{ExtractionStats, FieldCoverage, FieldCoverageTable, STAT_FIELDS, extraction_stats};
pub use validate::{
    ProjectValidation, ValidationReport, ValidationSummary, validate_extraction,
    validate_projects,
};
