//! Field extractors: each maps the full text to one optional field value.
//!
//! Every pattern-driven field is a [`RuleChain`] compiled once into
//! [`FieldPatterns`]. Precedence is the declaration order below.

use regex::{Captures, Regex};

use briefparse_shared::{MAX_DELIVERABLES, OrderedSet, Result, UNTITLED_PROJECT};

use crate::classify::KeywordTables;
use crate::rules::{Rule, RuleChain, group_trimmed, section_after, section_body};

/// Amount grammar shared by every budget rule: `15,000`, `2500.50`, `900`.
const AMOUNT: &str = r"(\d+(?:,\d{3})*(?:\.\d{2})?)";

/// First lines at least this long are not considered titles.
const TITLE_FALLBACK_MAX_CHARS: usize = 100;

/// Fallback description paragraphs must be longer than this.
const DESCRIPTION_FALLBACK_MIN_CHARS: usize = 50;

/// Client identity fields; each one is extracted independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

/// Compiled rule chains for every pattern-driven field.
pub struct FieldPatterns {
    title: RuleChain<String>,
    email: Regex,
    client_name: RuleChain<String>,
    company: RuleChain<String>,
    description: RuleChain<String>,
    bullets: Vec<Regex>,
    deliverables_section: Regex,
    budget: RuleChain<u64>,
    timeline: RuleChain<u32>,
    deadline: RuleChain<String>,
    pub(crate) hashtag: Regex,
}

impl FieldPatterns {
    /// Compile every rule. Fails only if a pattern is malformed.
    pub fn compile() -> Result<Self> {
        Ok(Self {
            title: RuleChain::new(vec![
                Rule::new("heading", r"(?mi)^#\s+(.+)$", group_trimmed)?,
                Rule::new("bold", r"(?mi)^\*\*(.+)\*\*$", group_trimmed)?,
                Rule::new("title-label", r"(?mi)Title:\s*(.+)$", group_trimmed)?,
                Rule::new("project-label", r"(?mi)Project:\s*(.+)$", group_trimmed)?,
                Rule::new("underlined", r"(?m)^(.+)\n[=-]{3,}", group_trimmed)?,
            ]),
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")?,
            client_name: RuleChain::new(vec![
                Rule::new("client", r"(?mi)Client:\s*(.+)$", group_trimmed)?,
                Rule::new("contact", r"(?mi)Contact:\s*(.+)$", group_trimmed)?,
                Rule::new("customer", r"(?mi)Customer:\s*(.+)$", group_trimmed)?,
                Rule::new("point-of-contact", r"(?mi)Point of Contact:\s*(.+)$", group_trimmed)?,
            ]),
            company: RuleChain::new(vec![
                Rule::new("company", r"(?mi)Company:\s*(.+)$", group_trimmed)?,
                Rule::new("organization", r"(?mi)Organization:\s*(.+)$", group_trimmed)?,
                Rule::new("business", r"(?mi)Business:\s*(.+)$", group_trimmed)?,
            ]),
            description: RuleChain::new(vec![
                Rule::new("description", r"(?i)Description:\s*", section_after)?,
                Rule::new("overview", r"(?i)Overview:\s*", section_after)?,
                Rule::new("summary", r"(?i)Summary:\s*", section_after)?,
                Rule::new("details", r"(?i)Details:\s*", section_after)?,
            ]),
            bullets: vec![
                Regex::new(r"^\s*[-*•]\s+(.+)$")?,
                Regex::new(r"^\s*\d+\.\s+(.+)$")?,
                Regex::new(r"^\s*[▪▫]\s+(.+)$")?,
            ],
            deliverables_section: Regex::new(r"(?i)Deliverables?:\s*")?,
            budget: RuleChain::new(vec![
                Rule::new("symbol", &format!(r"[$€£¥]\s*{AMOUNT}"), parse_amount)?,
                Rule::new(
                    "currency-code",
                    &format!(r"(?i){AMOUNT}\s*(?:USD|EUR|GBP|dollars?|euros?)"),
                    parse_amount,
                )?,
                Rule::new("budget-label", &format!(r"(?i)Budget:\s*[$€£¥]?\s*{AMOUNT}"), parse_amount)?,
                Rule::new("price-label", &format!(r"(?i)Price:\s*[$€£¥]?\s*{AMOUNT}"), parse_amount)?,
                Rule::new("cost-label", &format!(r"(?i)Cost:\s*[$€£¥]?\s*{AMOUNT}"), parse_amount)?,
            ]),
            timeline: RuleChain::new(vec![
                Rule::new("weeks", r"(?i)(\d+)\s*weeks?", parse_weeks)?,
                Rule::new(
                    "months-qualified",
                    r"(?i)(\d+)\s*months?\s*(?:timeline|duration|period)",
                    parse_weeks,
                )?,
                Rule::new("timeline-label", r"(?i)Timeline:\s*(\d+)\s*(?:weeks?|months?)", parse_weeks)?,
                Rule::new("duration-label", r"(?i)Duration:\s*(\d+)\s*(?:weeks?|months?)", parse_weeks)?,
            ]),
            deadline: RuleChain::new(vec![
                Rule::new("deadline-label", r"(?i)Deadline:\s*(\d{4}-\d{2}-\d{2})", normalize_date)?,
                Rule::new("due-label", r"(?i)Due:\s*(\d{4}-\d{2}-\d{2})", normalize_date)?,
                Rule::new("slash", r"(\d{1,2}/\d{1,2}/\d{4})", normalize_date)?,
                Rule::new("dash", r"(\d{1,2}-\d{1,2}-\d{4})", normalize_date)?,
                Rule::new(
                    "month-name",
                    r"(?i)(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}",
                    |caps, _| Some(caps[0].to_string()),
                )?,
            ]),
            hashtag: Regex::new(r"#(\w+)")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Title rules, then a short first line, then the placeholder.
pub fn extract_title(patterns: &FieldPatterns, text: &str) -> String {
    if let Some(title) = patterns.title.first_match(text) {
        return title;
    }

    let first_line = text.split('\n').next().unwrap_or_default().trim();
    if !first_line.is_empty() && first_line.chars().count() < TITLE_FALLBACK_MAX_CHARS {
        return first_line.to_string();
    }

    UNTITLED_PROJECT.to_string()
}

pub fn extract_client_info(patterns: &FieldPatterns, text: &str) -> ClientInfo {
    ClientInfo {
        name: patterns.client_name.first_match(text),
        email: patterns.email.find(text).map(|m| m.as_str().to_string()),
        company: patterns.company.first_match(text),
    }
}

/// Labelled description, else the first paragraph over 50 characters.
pub fn extract_description(patterns: &FieldPatterns, text: &str) -> String {
    if let Some(description) = patterns.description.first_match(text) {
        return description;
    }

    text.split("\n\n")
        .map(str::trim)
        .find(|p| p.chars().count() > DESCRIPTION_FALLBACK_MIN_CHARS)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Bullet lines anywhere, then the lines of a `Deliverables:` section.
pub fn extract_deliverables(patterns: &FieldPatterns, text: &str) -> OrderedSet<String> {
    let mut deliverables = OrderedSet::new();

    for line in text.split('\n') {
        let item = patterns
            .bullets
            .iter()
            .find_map(|re| re.captures(line))
            .map(|caps| caps[1].trim().to_string());
        if let Some(item) = item.filter(|i| !i.is_empty()) {
            deliverables.insert(item);
        }
    }

    if let Some(m) = patterns.deliverables_section.find(text) {
        let section = section_body(&text[m.end()..]).unwrap_or_default();
        deliverables.extend(
            section
                .split('\n')
                .map(str::trim)
                .filter(|line| {
                    !line.is_empty()
                        && !line.starts_with("Deliverable")
                        && !line.starts_with("deliverable")
                })
                .map(str::to_string),
        );
    }

    deliverables.truncate(MAX_DELIVERABLES);
    deliverables
}

pub fn extract_budget(patterns: &FieldPatterns, text: &str) -> Option<u64> {
    patterns.budget.first_match(text)
}

/// Duration in weeks.
pub fn extract_timeline(patterns: &FieldPatterns, text: &str) -> Option<u32> {
    patterns.timeline.first_match(text)
}

pub fn extract_deadline(patterns: &FieldPatterns, text: &str) -> Option<String> {
    patterns.deadline.first_match(text)
}

/// First known platform mentioned, title-cased.
pub fn extract_platform(tables: &KeywordTables, text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    tables
        .platforms
        .iter()
        .find(|platform| lower.contains(*platform))
        .map(|platform| title_case(platform))
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Strip thousands separators and any decimal part.
fn parse_amount(caps: &Captures<'_>, _text: &str) -> Option<u64> {
    let digits = caps[1].replace(',', "");
    digits.split('.').next()?.parse().ok()
}

/// Parse the count; month matches are converted at four weeks per month.
fn parse_weeks(caps: &Captures<'_>, _text: &str) -> Option<u32> {
    let count: u32 = caps[1].parse().ok()?;
    if caps[0].to_lowercase().contains("month") {
        count.checked_mul(4)
    } else {
        Some(count)
    }
}

/// `M/D/YYYY` and `M-D-YYYY` become `YYYY-MM-DD`; ISO dates pass through.
fn normalize_date(caps: &Captures<'_>, _text: &str) -> Option<String> {
    let raw = &caps[1];
    let separator = if raw.contains('/') {
        '/'
    } else if raw.split('-').next().is_some_and(|first| first.len() <= 2) {
        '-'
    } else {
        return Some(raw.to_string());
    };

    let parts: Vec<&str> = raw.split(separator).collect();
    match parts.as_slice() {
        [month, day, year] => Some(format!("{year}-{month:0>2}-{day:0>2}")),
        _ => None,
    }
}

/// Capitalise the first letter of every alphabetic run (`node.js` → `Node.Js`).
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
