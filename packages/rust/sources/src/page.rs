//! Document-page fetching.
//!
//! Live retrieval from a hosted workspace is out of scope; [`StubFetcher`]
//! answers every valid URL with a canned page (or a configured sample file).
//! The [`PageFetcher`] trait is the seam where a real client would plug in.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use url::Url;

use briefparse_shared::{BriefParseError, Result};

/// Canned page returned when no sample file is configured.
pub const NOTION_SAMPLE: &str = "# Website Redesign Project

**Client:** John Smith
**Company:** TechStart Inc.
**Email:** john.smith@techstart.com

## Project Description
Complete redesign of company website with modern UI/UX, improved performance, and mobile responsiveness. The current site is outdated and not converting visitors effectively.

## Deliverables
- New website design mockups
- Responsive frontend development
- CMS integration
- SEO optimization
- Performance optimization
- Testing and deployment

**Budget:** $15,000
**Timeline:** 8 weeks
**Priority:** High
**Status:** Active
**Deadline:** 2025-03-15
**Platform:** WordPress

#web #design #wordpress #responsive
";

/// Fetches the text content of a document page.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Offline fetcher returning canned content.
#[derive(Debug, Clone, Default)]
pub struct StubFetcher {
    sample_path: Option<PathBuf>,
}

impl StubFetcher {
    /// Serve the built-in sample page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the contents of `path` instead of the built-in page.
    pub fn with_sample(path: impl Into<PathBuf>) -> Self {
        Self {
            sample_path: Some(path.into()),
        }
    }

    pub fn sample_path(&self) -> Option<&Path> {
        self.sample_path.as_deref()
    }
}

impl PageFetcher for StubFetcher {
    #[instrument(skip_all, fields(url = %url))]
    fn fetch(&self, url: &Url) -> Result<String> {
        validate_page_url(url)?;
        info!("serving canned page content");

        match &self.sample_path {
            Some(path) => {
                debug!(path = %path.display(), "reading sample page");
                std::fs::read_to_string(path).map_err(|e| BriefParseError::io(path, e))
            }
            None => Ok(NOTION_SAMPLE.to_string()),
        }
    }
}

/// Parse a raw page URL.
pub fn parse_page_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| BriefParseError::Fetch(format!("invalid URL {raw:?}: {e}")))?;
    validate_page_url(&url)?;
    Ok(url)
}

/// Only `http`/`https` URLs with a host are accepted.
fn validate_page_url(url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BriefParseError::Fetch(format!(
            "unsupported URL scheme {:?}: {url}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(BriefParseError::Fetch(format!("URL has no host: {url}")));
    }
    Ok(())
}
