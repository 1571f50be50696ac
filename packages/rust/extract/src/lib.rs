//! Deterministic extraction of project records from free text.
//!
//! A [`ProjectParser`] owns the compiled [`FieldPatterns`] and the
//! [`KeywordTables`]. Both are built once and only read afterwards, so one
//! parser can be shared across threads and reused for every document.

mod classify;
mod confidence;
mod fields;
mod rules;

use tracing::{debug, info, instrument};

use briefparse_shared::{ExtractionResult, Language, ProjectRecord, Result};

pub use classify::{
    Bucket, KeywordTables, classify_industry, detect_language, determine_priority,
    determine_status, extract_tags,
};
pub use confidence::score as confidence_score;
pub use fields::{
    ClientInfo, FieldPatterns, extract_budget, extract_client_info, extract_deadline,
    extract_deliverables, extract_description, extract_platform, extract_timeline, extract_title,
};

/// One record plus the document-level signals computed alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub record: ProjectRecord,
    pub language: Language,
    pub confidence: f64,
}

/// Runs every extractor and classifier over a document.
pub struct ProjectParser {
    patterns: FieldPatterns,
    tables: KeywordTables,
}

impl ProjectParser {
    /// Compile the standard patterns and keyword tables.
    pub fn new() -> Result<Self> {
        Self::with_tables(KeywordTables::standard())
    }

    pub fn with_tables(tables: KeywordTables) -> Result<Self> {
        Ok(Self {
            patterns: FieldPatterns::compile()?,
            tables,
        })
    }

    pub fn patterns(&self) -> &FieldPatterns {
        &self.patterns
    }

    pub fn tables(&self) -> &KeywordTables {
        &self.tables
    }

    /// Build one record from `content`. Pure: the same text always yields
    /// the same record.
    pub fn extract(&self, content: &str) -> Extraction {
        let patterns = &self.patterns;
        let tables = &self.tables;

        let client = extract_client_info(patterns, content);
        let record = ProjectRecord {
            title: extract_title(patterns, content),
            client_name: client.name,
            client_email: client.email,
            client_company: client.company,
            description: extract_description(patterns, content),
            deliverables: extract_deliverables(patterns, content),
            estimated_budget: extract_budget(patterns, content),
            timeline: extract_timeline(patterns, content),
            industry: classify_industry(tables, content),
            priority: determine_priority(tables, content),
            status: determine_status(tables, content),
            tags: extract_tags(tables, &patterns.hashtag, content),
            deadline: extract_deadline(patterns, content),
            platform: extract_platform(tables, content),
        };

        let confidence = confidence_score(&record);
        let language = detect_language(tables, content);

        debug!(
            title = %record.title,
            deliverables = record.deliverables.len(),
            tags = record.tags.len(),
            "record assembled"
        );

        Extraction {
            record,
            language,
            confidence,
        }
    }

    /// Extract one record and wrap it in a successful [`ExtractionResult`].
    #[instrument(skip_all, fields(source = %source, bytes = content.len()))]
    pub fn parse(&self, content: &str, source: &str) -> ExtractionResult {
        let Extraction {
            record,
            language,
            confidence,
        } = self.extract(content);

        info!(%source, confidence, %language, "extraction complete");
        ExtractionResult::single(record, source, confidence, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefparse_shared::{Industry, Priority, Status};

    fn parser() -> ProjectParser {
        ProjectParser::new().expect("parser builds")
    }

    fn fixture(name: &str) -> String {
        let path = format!("../../../fixtures/briefs/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
    }

    #[test]
    fn parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProjectParser>();
    }

    #[test]
    fn notion_page_fixture() {
        let result = parser().parse(&fixture("notion-page.md"), "notion");
        assert!(result.success);
        assert_eq!(result.metadata.item_count, 1);
        assert_eq!(result.metadata.source, "notion");
        assert_eq!(result.metadata.language, Language::En);

        let record = &result.projects[0];
        assert_eq!(record.title, "Website Redesign Project");
        assert_eq!(record.client_email.as_deref(), Some("john.smith@techstart.com"));
        assert_eq!(record.estimated_budget, Some(15_000));
        assert_eq!(record.timeline, Some(8));
        // bold markup between the label and the date defeats the deadline rules
        assert!(record.deadline.is_none());
        assert_eq!(record.platform.as_deref(), Some("Wordpress"));
        // "Priority: High" is a label, not the "high priority" indicator
        assert_eq!(record.priority, Priority::Medium);
        assert_eq!(record.status, Status::Active);
        assert_eq!(record.deliverables.len(), 6);
        assert_eq!(record.deliverables.as_slice()[0], "New website design mockups");
        assert_eq!(record.tags.as_slice()[..3], ["web", "mobile", "design"]);
        assert!(record.tags.contains(&"responsive".to_string()));
    }

    #[test]
    fn ecommerce_brief_fixture() {
        let extraction = parser().extract(&fixture("ecommerce-brief.txt"));
        let record = &extraction.record;

        assert_eq!(record.title, "E-commerce Platform Development");
        assert_eq!(record.client_name.as_deref(), Some("Sarah Johnson"));
        assert_eq!(record.client_company.as_deref(), Some("Fashion Forward LLC"));
        assert_eq!(record.client_email.as_deref(), Some("sarah@fashionforward.com"));
        assert_eq!(record.estimated_budget, Some(25_000));
        assert_eq!(record.timeline, Some(12));
        assert_eq!(record.deadline.as_deref(), Some("2025-06-30"));
        assert_eq!(record.platform.as_deref(), Some("Shopify"));
        assert_eq!(record.industry, Industry::Retail);
        assert_eq!(record.priority, Priority::Medium);
        assert!(record.description.starts_with("Build a complete e-commerce platform"));
        assert!(record.deliverables.contains(&"Shopping cart functionality".to_string()));
        assert!((extraction.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn budget_and_timeline_together() {
        let record = parser().extract("Budget: $15,000\nTimeline: 8 weeks").record;
        assert_eq!(record.estimated_budget, Some(15_000));
        assert_eq!(record.timeline, Some(8));
    }

    #[test]
    fn empty_text_yields_placeholder_record() {
        let extraction = parser().extract("");
        assert_eq!(extraction.record.title, briefparse_shared::UNTITLED_PROJECT);
        assert_eq!(extraction.record.status, Status::Discovery);
        assert_eq!(extraction.confidence, 0.0);
        assert_eq!(extraction.language, Language::En);
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = fixture("ecommerce-brief.txt");
        let p = parser();
        assert_eq!(p.extract(&text), p.extract(&text));
    }

    #[test]
    fn invariants_hold_on_noisy_input() {
        let mut text = String::new();
        for i in 0..30 {
            text.push_str(&format!("- task {i}\n#tag{i}\n"));
        }
        let extraction = parser().extract(&text);
        assert!(extraction.record.deliverables.len() <= 10);
        assert!(extraction.record.tags.len() <= 10);
        assert!((0.0..=1.0).contains(&extraction.confidence));
    }
}
