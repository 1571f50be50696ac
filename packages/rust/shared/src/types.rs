//! Core domain types for extracted project records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Title used when no title rule matched.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Upper bound on deliverables kept per record.
pub const MAX_DELIVERABLES: usize = 10;

/// Upper bound on tags kept per record.
pub const MAX_TAGS: usize = 10;

/// Label reported when a source or language is not known.
pub const UNKNOWN_LABEL: &str = "unknown";

// ---------------------------------------------------------------------------
// OrderedSet
// ---------------------------------------------------------------------------

/// Insertion-ordered set: the first occurrence of a value wins, later
/// duplicates are dropped, iteration follows insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T>(Vec<T>);

impl<T: PartialEq> OrderedSet<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a value. Returns `false` if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    /// Keep only the first `len` values.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T: PartialEq> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialEq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for OrderedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + PartialEq> Deserialize<'de> for OrderedSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(|values| values.into_iter().collect())
    }
}

fn capped<'de, D: Deserializer<'de>>(
    deserializer: D,
    max: usize,
) -> std::result::Result<OrderedSet<String>, D::Error> {
    let mut set = OrderedSet::<String>::deserialize(deserializer)?;
    set.truncate(max);
    Ok(set)
}

fn deserialize_deliverables<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<OrderedSet<String>, D::Error> {
    capped(deserializer, MAX_DELIVERABLES)
}

fn deserialize_tags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<OrderedSet<String>, D::Error> {
    capped(deserializer, MAX_TAGS)
}

// ---------------------------------------------------------------------------
// Categorical labels
// ---------------------------------------------------------------------------

/// Industry bucket of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Technology,
    Healthcare,
    Retail,
    Finance,
    Education,
    Marketing,
    #[serde(rename = "real estate")]
    RealEstate,
    #[default]
    General,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Healthcare => "healthcare",
            Self::Retail => "retail",
            Self::Finance => "finance",
            Self::Education => "education",
            Self::Marketing => "marketing",
            Self::RealEstate => "real estate",
            Self::General => "general",
        }
    }
}

/// Project priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Pipeline status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Discovery,
    Proposal,
    Active,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Proposal => "proposal",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Coarse language guess for the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pl,
    Ru,
    Uk,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pl => "pl",
            Self::Ru => "ru",
            Self::Uk => "uk",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Industry, Priority, Status, Language);

// ---------------------------------------------------------------------------
// ProjectRecord
// ---------------------------------------------------------------------------

/// One structured project extracted from free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Never empty; [`UNTITLED_PROJECT`] when nothing matched.
    pub title: String,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_company: Option<String>,
    #[serde(default)]
    pub description: String,
    /// At most [`MAX_DELIVERABLES`] entries, also when loaded from JSON.
    #[serde(default, deserialize_with = "deserialize_deliverables")]
    pub deliverables: OrderedSet<String>,
    /// Whole currency units.
    pub estimated_budget: Option<u64>,
    /// Weeks.
    pub timeline: Option<u32>,
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    /// At most [`MAX_TAGS`] entries.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: OrderedSet<String>,
    /// `YYYY-MM-DD` for numeric dates, raw text for month-name dates.
    pub deadline: Option<String>,
    pub platform: Option<String>,
}

impl ProjectRecord {
    /// Whether the title came from a rule rather than the placeholder.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty() && self.title != UNTITLED_PROJECT
    }
}

// ---------------------------------------------------------------------------
// ExtractionResult
// ---------------------------------------------------------------------------

/// Metadata attached to a single-source extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    /// Source label (`notion`, a CRM vendor, `text`, `email`, ...).
    pub source: String,
    /// Completeness score in `[0, 1]`.
    pub confidence: f64,
    pub item_count: usize,
    pub language: Language,
    /// Set on every result produced here; absent in results saved elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_at: Option<DateTime<Utc>>,
}

/// Envelope returned by every extraction entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub projects: Vec<ProjectRecord>,
    pub metadata: ExtractionMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Wrap one assembled record.
    pub fn single(
        record: ProjectRecord,
        source: impl Into<String>,
        confidence: f64,
        language: Language,
    ) -> Self {
        Self {
            success: true,
            projects: vec![record],
            metadata: ExtractionMetadata {
                source: source.into(),
                confidence,
                item_count: 1,
                language,
                parsed_at: Some(Utc::now()),
            },
            error: None,
        }
    }

    /// The uniform error envelope: no projects, zero confidence, default metadata.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            projects: Vec::new(),
            metadata: ExtractionMetadata {
                source: UNKNOWN_LABEL.into(),
                confidence: 0.0,
                item_count: 0,
                language: Language::En,
                parsed_at: Some(Utc::now()),
            },
            error: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectBatch
// ---------------------------------------------------------------------------

/// Read-only view over a saved batch of records, single-source or combined.
///
/// Validation, statistics and export only need this much of a result.
pub trait ProjectBatch {
    fn succeeded(&self) -> bool;

    fn projects(&self) -> &[ProjectRecord];

    fn confidence(&self) -> f64;

    /// Source label; [`UNKNOWN_LABEL`] when the batch spans several sources.
    fn source(&self) -> &str {
        UNKNOWN_LABEL
    }

    /// Language code; [`UNKNOWN_LABEL`] when the batch spans several sources.
    fn language(&self) -> &str {
        UNKNOWN_LABEL
    }
}

impl ProjectBatch for ExtractionResult {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    fn confidence(&self) -> f64 {
        self.metadata.confidence
    }

    fn source(&self) -> &str {
        &self.metadata.source
    }

    fn language(&self) -> &str {
        self.metadata.language.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProjectRecord {
        ProjectRecord {
            title: "Website Redesign".into(),
            client_name: Some("John Smith".into()),
            client_email: None,
            client_company: None,
            description: String::new(),
            deliverables: ["Mockups".to_string(), "Frontend".to_string()]
                .into_iter()
                .collect(),
            estimated_budget: Some(15_000),
            timeline: Some(8),
            industry: Industry::RealEstate,
            priority: Priority::High,
            status: Status::Active,
            tags: OrderedSet::new(),
            deadline: None,
            platform: Some("Wordpress".into()),
        }
    }

    #[test]
    fn ordered_set_keeps_first_occurrence() {
        let set: OrderedSet<&str> = ["web", "api", "web", "design", "api"].into_iter().collect();
        assert_eq!(set.as_slice(), &["web", "api", "design"]);
    }

    #[test]
    fn ordered_set_deserializes_with_dedup() {
        let set: OrderedSet<String> = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["clientName"], "John Smith");
        assert_eq!(json["estimatedBudget"], 15_000);
        assert_eq!(json["industry"], "real estate");
        assert_eq!(json["priority"], "high");
        assert!(json["clientEmail"].is_null());
    }

    #[test]
    fn record_defaults_missing_labels() {
        let record: ProjectRecord =
            serde_json::from_str(r#"{"title":"Only a title"}"#).unwrap();
        assert_eq!(record.industry, Industry::General);
        assert_eq!(record.priority, Priority::Medium);
        assert_eq!(record.status, Status::Discovery);
        assert!(record.deliverables.is_empty());
    }

    #[test]
    fn placeholder_title_is_not_a_title() {
        let mut record = sample_record();
        assert!(record.has_title());
        record.title = UNTITLED_PROJECT.into();
        assert!(!record.has_title());
    }

    #[test]
    fn failure_envelope_shape() {
        let result = ExtractionResult::failure("Failed to process text: boom");
        assert!(!result.success);
        assert!(result.projects.is_empty());
        assert_eq!(result.metadata.source, "unknown");
        assert_eq!(result.metadata.confidence, 0.0);
        assert_eq!(result.metadata.item_count, 0);
        assert_eq!(result.metadata.language, Language::En);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["metadata"]["itemCount"], 0);
        assert_eq!(json["error"], "Failed to process text: boom");
    }

    #[test]
    fn single_envelope_counts_one_item() {
        let result = ExtractionResult::single(sample_record(), "text", 0.5, Language::En);
        assert!(result.success);
        assert_eq!(result.metadata.item_count, result.projects.len());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("error").is_none());
        assert!(json["metadata"]["parsedAt"].is_string());
    }

    #[test]
    fn result_without_parsed_at_loads() {
        let raw = r#"{
            "success": true,
            "projects": [{"title": "Portal", "clientName": null, "clientEmail": null,
                          "clientCompany": null, "description": "", "deliverables": [],
                          "estimatedBudget": null, "timeline": null, "industry": "general",
                          "priority": "medium", "status": "discovery", "tags": [],
                          "deadline": null, "platform": null}],
            "metadata": {"source": "text", "confidence": 0.3, "itemCount": 1, "language": "en"}
        }"#;
        let result: ExtractionResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.metadata.parsed_at, None);
        assert_eq!(result.projects[0].title, "Portal");

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["metadata"].get("parsedAt").is_none());
    }

    #[test]
    fn loaded_record_lists_are_capped() {
        let items: Vec<String> = (0..15).map(|i| format!("item {i}")).collect();
        let record: ProjectRecord = serde_json::from_value(serde_json::json!({
            "title": "Big",
            "deliverables": items,
            "tags": items,
        }))
        .unwrap();
        assert_eq!(record.deliverables.len(), MAX_DELIVERABLES);
        assert_eq!(record.tags.len(), MAX_TAGS);
        assert_eq!(record.deliverables.as_slice()[0], "item 0");
        assert_eq!(record.tags.as_slice()[9], "item 9");
    }

    #[test]
    fn batch_view_of_single_result() {
        let result = ExtractionResult::single(sample_record(), "hubspot", 0.7, Language::Pl);
        assert!(result.succeeded());
        assert_eq!(ProjectBatch::projects(&result).len(), 1);
        assert_eq!(result.source(), "hubspot");
        assert_eq!(result.language(), "pl");
        assert_eq!(ProjectBatch::confidence(&result), 0.7);
    }

    #[test]
    fn result_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/result.fixture.json")
            .expect("read fixture");
        let parsed: ExtractionResult =
            serde_json::from_str(&fixture).expect("deserialize fixture result");
        assert!(parsed.success);
        assert_eq!(parsed.projects.len(), 2);
        assert_eq!(parsed.metadata.item_count, 2);
        assert_eq!(parsed.projects[0].title, "Website Redesign Project");
    }
}
