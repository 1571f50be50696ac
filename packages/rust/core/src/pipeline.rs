//! Entry points: URL, webhook, text and email → [`ExtractionResult`].
//!
//! Each entry point is a failure boundary. Internal faults (invalid URL,
//! unreadable sample, malformed payload, pattern compile failure) become the
//! uniform error envelope instead of propagating to the caller.

use serde_json::Value;
use tracing::{error, info, instrument, warn};

use briefparse_extract::ProjectParser;
use briefparse_shared::{AppConfig, BriefParseError, ExtractionResult, Result};
use briefparse_sources::{
    PageFetcher, StubFetcher, flatten_payload, identify_crm_source, parse_page_url,
};

use crate::aggregate::{self, AggregateResult, SourceDescriptor, SourceKind};

/// Default label for text extractions.
pub const TEXT_SOURCE: &str = "text";
/// Label for email extractions.
pub const EMAIL_SOURCE: &str = "email";
/// Label for page extractions.
pub const NOTION_SOURCE: &str = "notion";

/// Extraction facade over a [`ProjectParser`] and a [`PageFetcher`].
pub struct BriefParser<F = StubFetcher> {
    /// Compile failures are kept and reported by every entry point.
    parser: std::result::Result<ProjectParser, String>,
    fetcher: F,
}

impl BriefParser<StubFetcher> {
    /// Parser with the built-in canned page.
    pub fn new() -> Self {
        Self::with_fetcher(StubFetcher::new())
    }

    /// Parser whose fetch stub honours `[notion] sample_path`.
    pub fn from_config(config: &AppConfig) -> Self {
        let fetcher = match &config.notion.sample_path {
            Some(path) => StubFetcher::with_sample(path),
            None => StubFetcher::new(),
        };
        Self::with_fetcher(fetcher)
    }
}

impl Default for BriefParser<StubFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PageFetcher> BriefParser<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        let parser = ProjectParser::new().map_err(|e| {
            error!(error = %e, "failed to build project parser");
            e.to_string()
        });
        Self { parser, fetcher }
    }

    fn project_parser(&self) -> Result<&ProjectParser> {
        self.parser
            .as_ref()
            .map_err(|e| BriefParseError::Pattern(e.clone()))
    }

    /// Fetch a document page and extract from it.
    #[instrument(skip_all, fields(url = %url))]
    pub fn extract_from_url(&self, url: &str) -> ExtractionResult {
        bounded("Failed to process Notion URL", || {
            let url = parse_page_url(url)?;
            let content = self.fetcher.fetch(&url)?;
            Ok(self.project_parser()?.parse(&content, NOTION_SOURCE))
        })
    }

    /// Flatten a CRM webhook payload and extract from it. The source label
    /// is the detected vendor.
    #[instrument(skip_all)]
    pub fn extract_from_webhook(&self, payload: &Value) -> ExtractionResult {
        bounded("Failed to process CRM webhook", || {
            let source = identify_crm_source(payload);
            let content = flatten_payload(payload)?;
            info!(%source, lines = content.lines().count(), "webhook flattened");
            Ok(self.project_parser()?.parse(&content, source))
        })
    }

    #[instrument(skip_all, fields(source = %source))]
    pub fn extract_from_text(&self, text: &str, source: &str) -> ExtractionResult {
        bounded("Failed to process text", || {
            Ok(self.project_parser()?.parse(text, source))
        })
    }

    /// Text extraction labelled `email`.
    pub fn extract_from_email(&self, body: &str) -> ExtractionResult {
        self.extract_from_text(body, EMAIL_SOURCE)
    }

    /// Route each descriptor to its entry point and combine the results.
    ///
    /// Unknown types are skipped; descriptors whose `data` has the wrong
    /// shape count as failed sources.
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub fn aggregate(&self, sources: &[SourceDescriptor]) -> AggregateResult {
        let mut results = Vec::with_capacity(sources.len());

        for (index, descriptor) in sources.iter().enumerate() {
            let Some(kind) = SourceKind::parse(&descriptor.kind) else {
                warn!(index, kind = %descriptor.kind, "skipping unknown source type");
                continue;
            };

            let result = self.extract_descriptor(kind, &descriptor.data);
            if let Some(err) = &result.error {
                warn!(index, kind = %descriptor.kind, error = %err, "source failed");
            }
            results.push(result);
        }

        let combined = aggregate::combine(results, sources.len());
        info!(
            projects = combined.metadata.item_count,
            confidence = combined.metadata.confidence,
            "aggregation complete"
        );
        combined
    }

    fn extract_descriptor(&self, kind: SourceKind, data: &Value) -> ExtractionResult {
        match (kind, data) {
            (SourceKind::Notion, Value::String(url)) => self.extract_from_url(url),
            (SourceKind::Crm, payload) => self.extract_from_webhook(payload),
            (SourceKind::Text, Value::String(text)) => self.extract_from_text(text, TEXT_SOURCE),
            (SourceKind::Email, Value::String(body)) => self.extract_from_email(body),
            (kind, _) => ExtractionResult::failure(format!(
                "Invalid {kind:?} source: data must be a string"
            )),
        }
    }
}

/// Run `op`, converting any error into the failure envelope.
fn bounded(context: &str, op: impl FnOnce() -> Result<ExtractionResult>) -> ExtractionResult {
    op().unwrap_or_else(|e| {
        error!(error = %e, "{context}");
        ExtractionResult::failure(format!("{context}: {e}"))
    })
}
