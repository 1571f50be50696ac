//! Completeness score for an assembled record.

use briefparse_shared::ProjectRecord;

const TITLE_WEIGHT: f64 = 0.3;
const CLIENT_NAME_WEIGHT: f64 = 0.2;
const CLIENT_EMAIL_WEIGHT: f64 = 0.2;
const DESCRIPTION_WEIGHT: f64 = 0.2;
const DELIVERABLES_WEIGHT: f64 = 0.1;

/// Descriptions must be longer than this to count.
const DESCRIPTION_MIN_CHARS: usize = 50;

/// Weighted sum of the fields that were found, capped at `1.0`.
pub fn score(record: &ProjectRecord) -> f64 {
    let mut score = 0.0;

    if record.has_title() {
        score += TITLE_WEIGHT;
    }
    if record.client_name.is_some() {
        score += CLIENT_NAME_WEIGHT;
    }
    if record.client_email.is_some() {
        score += CLIENT_EMAIL_WEIGHT;
    }
    if record.description.chars().count() > DESCRIPTION_MIN_CHARS {
        score += DESCRIPTION_WEIGHT;
    }
    if !record.deliverables.is_empty() {
        score += DELIVERABLES_WEIGHT;
    }

    f64::min(score, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefparse_shared::{OrderedSet, UNTITLED_PROJECT};

    fn empty_record() -> ProjectRecord {
        ProjectRecord {
            title: UNTITLED_PROJECT.into(),
            client_name: None,
            client_email: None,
            client_company: None,
            description: String::new(),
            deliverables: OrderedSet::new(),
            estimated_budget: None,
            timeline: None,
            industry: Default::default(),
            priority: Default::default(),
            status: Default::default(),
            tags: OrderedSet::new(),
            deadline: None,
            platform: None,
        }
    }

    #[test]
    fn placeholder_record_scores_zero() {
        assert_eq!(score(&empty_record()), 0.0);
    }

    #[test]
    fn full_record_scores_one() {
        let mut record = empty_record();
        record.title = "Real title".into();
        record.client_name = Some("Jane".into());
        record.client_email = Some("jane@example.com".into());
        record.description = "d".repeat(51);
        record.deliverables.insert("Mockups".into());

        let s = score(&record);
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
        assert!(s <= 1.0);
    }

    #[test]
    fn description_needs_more_than_fifty_chars() {
        let mut record = empty_record();
        record.description = "d".repeat(50);
        assert_eq!(score(&record), 0.0);
        record.description.push('d');
        assert!((score(&record) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn company_and_budget_do_not_count() {
        let mut record = empty_record();
        record.client_company = Some("Acme".into());
        record.estimated_budget = Some(10);
        assert_eq!(score(&record), 0.0);
    }
}
