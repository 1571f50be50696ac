//! Ordered first-match-wins rule chains.
//!
//! A [`RuleChain`] holds `(pattern, transform)` pairs in priority order.
//! Rules are tried in sequence; the first rule whose pattern matches *and*
//! whose transform yields a value decides the result. A transform returning
//! `None` lets the chain fall through to the next rule.

use regex::{Captures, Regex};
use tracing::trace;

use briefparse_shared::Result;

/// Turns a successful match into a field value. Receives the captures and the
/// full haystack (for rules that read past the end of the match).
pub(crate) type Transform<T> = fn(&Captures<'_>, &str) -> Option<T>;

/// A single named pattern rule.
pub(crate) struct Rule<T> {
    name: &'static str,
    pattern: Regex,
    transform: Transform<T>,
}

impl<T> Rule<T> {
    pub(crate) fn new(name: &'static str, pattern: &str, transform: Transform<T>) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            transform,
        })
    }

    fn apply(&self, text: &str) -> Option<T> {
        let caps = self.pattern.captures(text)?;
        (self.transform)(&caps, text)
    }
}

/// Rules evaluated in declaration order, short-circuiting on the first value.
pub(crate) struct RuleChain<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleChain<T> {
    pub(crate) fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    pub(crate) fn first_match(&self, text: &str) -> Option<T> {
        self.rules.iter().find_map(|rule| {
            let value = rule.apply(text)?;
            trace!(rule = rule.name, "rule matched");
            Some(value)
        })
    }
}

// ---------------------------------------------------------------------------
// Shared transforms
// ---------------------------------------------------------------------------

/// Capture group 1, trimmed; empty captures fall through.
pub(crate) fn group_trimmed(caps: &Captures<'_>, _text: &str) -> Option<String> {
    let value = caps.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// The labelled block that starts right after the match, trimmed.
pub(crate) fn section_after(caps: &Captures<'_>, text: &str) -> Option<String> {
    let end = caps.get(0)?.end();
    let body = section_body(&text[end..])?.trim();
    (!body.is_empty()).then(|| body.to_string())
}

/// Take at least one character, then stop before the first blank line, the
/// first line starting with an uppercase letter, or the end of the text.
pub(crate) fn section_body(rest: &str) -> Option<&str> {
    let mut chars = rest.char_indices();
    chars.next()?;

    for (i, ch) in chars {
        if ch != '\n' {
            continue;
        }
        match rest[i + 1..].chars().next() {
            Some('\n') => return Some(&rest[..i]),
            Some(next) if next.is_ascii_uppercase() => return Some(&rest[..i]),
            _ => {}
        }
    }

    Some(rest)
}
