//! Input adapters that turn non-text sources into parseable text.
//!
//! - [`webhook`]: CRM webhook JSON → vendor label + flattened `key: value` text
//! - [`page`]: document-page URLs → page text via a [`PageFetcher`]

pub mod page;
pub mod webhook;

pub use page::{NOTION_SAMPLE, PageFetcher, StubFetcher, parse_page_url};
pub use webhook::{GENERIC_CRM, flatten_payload, identify_crm_source};
