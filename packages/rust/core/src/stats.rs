//! Field coverage and label distributions over a batch of records.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use briefparse_shared::{BriefParseError, ProjectBatch, ProjectRecord, Result};

/// Fields counted for coverage, in report order.
pub const STAT_FIELDS: [&str; 14] = [
    "title",
    "clientName",
    "clientEmail",
    "clientCompany",
    "description",
    "estimatedBudget",
    "timeline",
    "industry",
    "priority",
    "status",
    "platform",
    "deadline",
    "deliverables",
    "tags",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldCoverage {
    pub count: usize,
    pub percentage: f64,
}

/// Coverage per field, serialized as a map in [`STAT_FIELDS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCoverageTable(Vec<(&'static str, FieldCoverage)>);

impl FieldCoverageTable {
    pub fn get(&self, field: &str) -> Option<FieldCoverage> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, coverage)| *coverage)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldCoverage)> + '_ {
        self.0.iter().copied()
    }
}

impl Serialize for FieldCoverageTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, coverage) in &self.0 {
            map.serialize_entry(field, coverage)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub total_projects: usize,
    pub source: String,
    pub confidence: f64,
    pub language: String,
    pub fields_extracted: FieldCoverageTable,
    pub industry_distribution: BTreeMap<String, usize>,
    pub priority_distribution: BTreeMap<String, usize>,
    pub status_distribution: BTreeMap<String, usize>,
}

/// Compute batch statistics. Failed results are rejected.
pub fn extraction_stats<R: ProjectBatch + ?Sized>(result: &R) -> Result<ExtractionStats> {
    if !result.succeeded() {
        return Err(BriefParseError::validation("Invalid result"));
    }

    let projects = result.projects();
    let total = projects.len();

    let fields_extracted = FieldCoverageTable(
        STAT_FIELDS
            .iter()
            .map(|&field| {
                let count = projects.iter().filter(|p| field_present(p, field)).count();
                (
                    field,
                    FieldCoverage {
                        count,
                        percentage: percent(count, total),
                    },
                )
            })
            .collect(),
    );

    let mut industry_distribution = BTreeMap::new();
    let mut priority_distribution = BTreeMap::new();
    let mut status_distribution = BTreeMap::new();
    for project in projects {
        *industry_distribution
            .entry(project.industry.to_string())
            .or_insert(0) += 1;
        *priority_distribution
            .entry(project.priority.to_string())
            .or_insert(0) += 1;
        *status_distribution
            .entry(project.status.to_string())
            .or_insert(0) += 1;
    }

    Ok(ExtractionStats {
        total_projects: total,
        source: result.source().to_string(),
        confidence: result.confidence(),
        language: result.language().to_string(),
        fields_extracted,
        industry_distribution,
        priority_distribution,
        status_distribution,
    })
}

/// Truthiness of one field: non-empty text or list, non-zero number.
fn field_present(project: &ProjectRecord, field: &str) -> bool {
    fn text(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.is_empty())
    }

    match field {
        "title" => !project.title.is_empty(),
        "clientName" => text(&project.client_name),
        "clientEmail" => text(&project.client_email),
        "clientCompany" => text(&project.client_company),
        "description" => !project.description.is_empty(),
        "estimatedBudget" => project.estimated_budget.is_some_and(|b| b != 0),
        "timeline" => project.timeline.is_some_and(|t| t != 0),
        // labels always carry a non-empty value
        "industry" | "priority" | "status" => true,
        "platform" => text(&project.platform),
        "deadline" => text(&project.deadline),
        "deliverables" => !project.deliverables.is_empty(),
        "tags" => !project.tags.is_empty(),
        _ => false,
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
