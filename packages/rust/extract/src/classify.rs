//! Keyword-bucket classifiers: industry, priority, status, language, tags.
//!
//! All lookups are case-insensitive substring checks against the lowercased
//! text. Bucket order inside each table is part of the contract: it breaks
//! industry ties and decides the first-hit classifiers.

use regex::Regex;

use briefparse_shared::{Industry, Language, MAX_TAGS, OrderedSet, Priority, Status};

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// A label and the keywords that vote for it.
#[derive(Debug, Clone)]
pub struct Bucket<L> {
    pub label: L,
    pub keywords: &'static [&'static str],
}

impl<L> Bucket<L> {
    const fn new(label: L, keywords: &'static [&'static str]) -> Self {
        Self { label, keywords }
    }

    /// Number of keywords present in `lower`.
    fn score(&self, lower: &str) -> usize {
        self.keywords.iter().filter(|k| lower.contains(*k)).count()
    }

    fn hit(&self, lower: &str) -> bool {
        self.keywords.iter().any(|k| lower.contains(k))
    }
}

/// Read-only keyword tables shared by every classifier.
///
/// Built once (usually via [`KeywordTables::standard`]) and passed by
/// reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct KeywordTables {
    pub industries: Vec<Bucket<Industry>>,
    pub priorities: Vec<Bucket<Priority>>,
    pub statuses: Vec<Bucket<Status>>,
    pub languages: Vec<Bucket<Language>>,
    /// Generic technology tags.
    pub tech_tags: &'static [&'static str],
    /// Known platforms, in lookup priority order.
    pub platforms: &'static [&'static str],
}

impl KeywordTables {
    pub fn standard() -> Self {
        Self {
            industries: vec![
                Bucket::new(
                    Industry::Technology,
                    &["software", "app", "web", "mobile", "tech", "digital", "platform", "api", "saas"],
                ),
                Bucket::new(
                    Industry::Healthcare,
                    &["medical", "health", "hospital", "clinic", "patient", "healthcare", "pharma"],
                ),
                Bucket::new(
                    Industry::Retail,
                    &["ecommerce", "shop", "store", "retail", "product", "inventory", "sales"],
                ),
                Bucket::new(
                    Industry::Finance,
                    &["bank", "financial", "payment", "fintech", "trading", "investment"],
                ),
                Bucket::new(
                    Industry::Education,
                    &["school", "university", "learning", "course", "student", "education"],
                ),
                Bucket::new(
                    Industry::Marketing,
                    &["marketing", "advertising", "campaign", "brand", "social media"],
                ),
                Bucket::new(
                    Industry::RealEstate,
                    &["property", "real estate", "housing", "rental", "mortgage"],
                ),
            ],
            priorities: vec![
                Bucket::new(
                    Priority::High,
                    &["urgent", "asap", "critical", "high priority", "rush", "immediate"],
                ),
                Bucket::new(
                    Priority::Medium,
                    &["important", "medium priority", "standard", "normal"],
                ),
                Bucket::new(
                    Priority::Low,
                    &["low priority", "when possible", "nice to have", "future"],
                ),
            ],
            statuses: vec![
                Bucket::new(
                    Status::Discovery,
                    &["discovery", "research", "planning", "initial", "exploration"],
                ),
                Bucket::new(
                    Status::Proposal,
                    &["proposal", "quote", "estimate", "bidding", "pitch"],
                ),
                Bucket::new(
                    Status::Active,
                    &["active", "in progress", "development", "working", "ongoing"],
                ),
                Bucket::new(
                    Status::Completed,
                    &["completed", "finished", "done", "delivered", "closed"],
                ),
            ],
            // `uk` sits after `en` and shares its English trigger words, so it
            // only fires on text that says "description" and nothing `en` knows.
            languages: vec![
                Bucket::new(Language::En, &["the", "and", "project", "client"]),
                Bucket::new(Language::Pl, &["projekt", "klient", "opis"]),
                Bucket::new(Language::Ru, &["проект", "клиент", "описание"]),
                Bucket::new(Language::Uk, &["project", "client", "description"]),
            ],
            tech_tags: &["web", "mobile", "design", "backend", "frontend", "api", "database"],
            platforms: &[
                "wordpress", "shopify", "react", "vue", "angular", "django", "flask",
                "laravel", "rails", "node.js", "next.js", "gatsby", "squarespace",
                "webflow", "wix", "magento", "prestashop",
            ],
        }
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Classifiers
// ---------------------------------------------------------------------------

/// Bucket with the most keyword hits; ties go to the earlier bucket.
pub fn classify_industry(tables: &KeywordTables, text: &str) -> Industry {
    let lower = text.to_lowercase();
    let mut best: Option<(Industry, usize)> = None;

    for bucket in &tables.industries {
        let score = bucket.score(&lower);
        if score == 0 {
            continue;
        }
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((bucket.label, score));
        }
    }

    best.map(|(industry, _)| industry).unwrap_or(Industry::General)
}

/// First bucket (in table order) with any indicator present.
fn first_hit<L: Copy>(buckets: &[Bucket<L>], lower: &str) -> Option<L> {
    buckets
        .iter()
        .find(|bucket| bucket.hit(lower))
        .map(|bucket| bucket.label)
}

pub fn determine_priority(tables: &KeywordTables, text: &str) -> Priority {
    first_hit(&tables.priorities, &text.to_lowercase()).unwrap_or_default()
}

pub fn determine_status(tables: &KeywordTables, text: &str) -> Status {
    first_hit(&tables.statuses, &text.to_lowercase()).unwrap_or_default()
}

pub fn detect_language(tables: &KeywordTables, text: &str) -> Language {
    first_hit(&tables.languages, &text.to_lowercase()).unwrap_or_default()
}

/// Tech tags, then platforms, then `#hashtags`, deduplicated in that order.
pub fn extract_tags(tables: &KeywordTables, hashtag: &Regex, text: &str) -> OrderedSet<String> {
    let lower = text.to_lowercase();

    let mut tags: OrderedSet<String> = tables
        .tech_tags
        .iter()
        .chain(tables.platforms)
        .filter(|keyword| lower.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect();

    tags.extend(hashtag.captures_iter(text).map(|caps| caps[1].to_string()));
    tags.truncate(MAX_TAGS);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> KeywordTables {
        KeywordTables::standard()
    }

    fn hashtag() -> Regex {
        Regex::new(r"#(\w+)").unwrap()
    }

    #[test]
    fn industry_highest_count_wins() {
        let text = "A hospital clinic for patient intake, built as a web app";
        assert_eq!(classify_industry(&tables(), text), Industry::Healthcare);
    }

    #[test]
    fn industry_tie_goes_to_earlier_bucket() {
        // one technology hit ("software") vs one finance hit ("bank")
        assert_eq!(
            classify_industry(&tables(), "software for a bank"),
            Industry::Technology
        );
        // one retail hit ("inventory") vs one finance hit ("trading")
        assert_eq!(
            classify_industry(&tables(), "inventory trading"),
            Industry::Retail
        );
    }

    #[test]
    fn industry_defaults_to_general() {
        assert_eq!(classify_industry(&tables(), "hello there"), Industry::General);
    }

    #[test]
    fn industry_multiword_keyword() {
        assert_eq!(
            classify_industry(&tables(), "Selling REAL ESTATE listings"),
            Industry::RealEstate
        );
    }

    #[test]
    fn priority_first_bucket_wins() {
        // "urgent" (high) and "nice to have" (low) both present
        assert_eq!(
            determine_priority(&tables(), "Urgent, but polish is nice to have"),
            Priority::High
        );
        assert_eq!(determine_priority(&tables(), "low priority"), Priority::Low);
        assert_eq!(determine_priority(&tables(), "no signal"), Priority::Medium);
    }

    #[test]
    fn status_first_bucket_wins() {
        assert_eq!(
            determine_status(&tables(), "Development is ongoing, proposal sent"),
            Status::Proposal
        );
        assert_eq!(determine_status(&tables(), "Work finished"), Status::Completed);
        assert_eq!(determine_status(&tables(), "nothing"), Status::Discovery);
    }

    #[test]
    fn language_buckets() {
        assert_eq!(detect_language(&tables(), "The client wants"), Language::En);
        assert_eq!(detect_language(&tables(), "Nowy projekt, opis"), Language::Pl);
        assert_eq!(detect_language(&tables(), "Новый проект"), Language::Ru);
        assert_eq!(detect_language(&tables(), "xyz"), Language::En);
    }

    #[test]
    fn language_uk_is_shadowed_by_en() {
        // Known limitation: "project"/"client" are checked by `en` first.
        assert_eq!(detect_language(&tables(), "project client"), Language::En);
        // Only "description" alone reaches the `uk` bucket.
        assert_eq!(detect_language(&tables(), "Description"), Language::Uk);
    }

    #[test]
    fn tags_ordered_and_deduplicated() {
        let text = "Web design on Shopify #shopify #launch #web";
        let tags = extract_tags(&tables(), &hashtag(), text);
        assert_eq!(tags.as_slice(), &["web", "design", "shopify", "launch"]);
    }

    #[test]
    fn tags_keep_hashtag_case() {
        let tags = extract_tags(&tables(), &hashtag(), "#Launch");
        assert_eq!(tags.as_slice(), &["Launch"]);
    }

    #[test]
    fn tags_truncated_to_ten() {
        let text = "#a1 #a2 #a3 #a4 #a5 #a6 #a7 #a8 #a9 #a10 #a11 #a12";
        let tags = extract_tags(&tables(), &hashtag(), text);
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags.as_slice()[9], "a10");
    }

    #[test]
    fn tags_are_deterministic() {
        let text = "react vue angular mobile backend #x #y";
        let a = extract_tags(&tables(), &hashtag(), text);
        let b = extract_tags(&tables(), &hashtag(), text);
        assert_eq!(a, b);
    }
}
