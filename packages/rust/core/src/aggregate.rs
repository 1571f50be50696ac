//! Merging extraction results from several heterogeneous sources.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use briefparse_shared::{ExtractionResult, Language, OrderedSet, ProjectBatch, ProjectRecord};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One `{type, data}` entry of an aggregation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl SourceDescriptor {
    pub fn new(kind: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }
}

/// Source types the aggregator knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `data` is a page URL string.
    Notion,
    /// `data` is a webhook JSON object.
    Crm,
    /// `data` is raw text.
    Text,
    /// `data` is an email body.
    Email,
}

impl SourceKind {
    /// `None` for unrecognized type names, which the aggregator skips.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "notion" => Some(Self::Notion),
            "crm" => Some(Self::Crm),
            "text" => Some(Self::Text),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetadata {
    /// Source labels of the successful results, first-seen order.
    pub sources: OrderedSet<String>,
    /// Sum of successful confidences over the number of descriptors supplied.
    pub confidence: f64,
    pub item_count: usize,
    pub languages: OrderedSet<Language>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub success: bool,
    pub projects: Vec<ProjectRecord>,
    pub metadata: AggregateMetadata,
}

impl ProjectBatch for AggregateResult {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    fn confidence(&self) -> f64 {
        self.metadata.confidence
    }
}

/// A result loaded from disk: either a single-source extraction or the
/// output of [`combine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedResult {
    Single(ExtractionResult),
    Combined(AggregateResult),
}

impl ProjectBatch for SavedResult {
    fn succeeded(&self) -> bool {
        match self {
            Self::Single(r) => r.succeeded(),
            Self::Combined(r) => r.succeeded(),
        }
    }

    fn projects(&self) -> &[ProjectRecord] {
        match self {
            Self::Single(r) => ProjectBatch::projects(r),
            Self::Combined(r) => ProjectBatch::projects(r),
        }
    }

    fn confidence(&self) -> f64 {
        match self {
            Self::Single(r) => ProjectBatch::confidence(r),
            Self::Combined(r) => ProjectBatch::confidence(r),
        }
    }

    fn source(&self) -> &str {
        match self {
            Self::Single(r) => r.source(),
            Self::Combined(r) => r.source(),
        }
    }

    fn language(&self) -> &str {
        match self {
            Self::Single(r) => r.language(),
            Self::Combined(r) => r.language(),
        }
    }
}

/// Combine per-source results.
///
/// `total_sources` is the number of descriptors originally supplied, skipped
/// ones included, and is the confidence divisor. Failed results contribute
/// nothing but still count toward it.
pub fn combine(
    results: impl IntoIterator<Item = ExtractionResult>,
    total_sources: usize,
) -> AggregateResult {
    let mut projects = Vec::new();
    let mut confidence_sum = 0.0;
    let mut sources = OrderedSet::new();
    let mut languages = OrderedSet::new();

    for result in results.into_iter().filter(|r| r.success) {
        confidence_sum += result.metadata.confidence;
        sources.insert(result.metadata.source);
        languages.insert(result.metadata.language);
        projects.extend(result.projects);
    }

    let confidence = if total_sources == 0 {
        0.0
    } else {
        confidence_sum / total_sources as f64
    };

    AggregateResult {
        success: true,
        metadata: AggregateMetadata {
            sources,
            confidence,
            item_count: projects.len(),
            languages,
        },
        projects,
    }
}
