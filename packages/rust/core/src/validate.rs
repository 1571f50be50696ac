//! Independent quality re-scoring of extracted records.
//!
//! The validator does not trust the extractor's confidence. It checks each
//! record's fields again, records errors (record is unusable) and warnings
//! (record is incomplete), and scores quality on its own scale.

use serde::{Deserialize, Serialize};
use tracing::warn;

use briefparse_shared::{ProjectBatch, ProjectRecord};

/// Descriptions shorter than this draw a warning.
const MIN_DESCRIPTION_CHARS: usize = 20;

const TITLE_POINTS: f64 = 0.2;
const CLIENT_POINTS: f64 = 0.2;
const DESCRIPTION_POINTS: f64 = 0.2;
const BUDGET_POINTS: f64 = 0.1;
const TIMELINE_POINTS: f64 = 0.1;
const DELIVERABLES_POINTS: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectValidation {
    pub project_index: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub quality_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_projects: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub overall_quality_score: f64,
    /// Result-level errors (failed extraction, empty batch).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub project_validations: Vec<ProjectValidation>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    fn rejected(error: &str) -> Self {
        Self {
            valid: false,
            overall_quality_score: 0.0,
            errors: vec![error.to_string()],
            project_validations: Vec::new(),
            summary: ValidationSummary {
                total_projects: 0,
                total_errors: 1,
                total_warnings: 0,
            },
        }
    }
}

/// Validate every record of a result, single-source or combined.
pub fn validate_extraction<R: ProjectBatch + ?Sized>(result: &R) -> ValidationReport {
    if !result.succeeded() {
        return ValidationReport::rejected("Extraction failed");
    }
    validate_projects(result.projects())
}

/// Validate a batch of records. An empty batch is rejected.
pub fn validate_projects(projects: &[ProjectRecord]) -> ValidationReport {
    if projects.is_empty() {
        return ValidationReport::rejected("No projects extracted");
    }

    let project_validations: Vec<ProjectValidation> = projects
        .iter()
        .enumerate()
        .map(|(index, project)| validate_project(index, project))
        .collect();

    let total_errors: usize = project_validations.iter().map(|v| v.errors.len()).sum();
    let total_warnings: usize = project_validations.iter().map(|v| v.warnings.len()).sum();
    let overall_quality_score = project_validations
        .iter()
        .map(|v| v.quality_score)
        .sum::<f64>()
        / project_validations.len() as f64;

    if total_warnings > 0 || total_errors > 0 {
        warn!(total_errors, total_warnings, "validation found issues");
    }

    ValidationReport {
        valid: total_errors == 0,
        overall_quality_score,
        errors: Vec::new(),
        summary: ValidationSummary {
            total_projects: projects.len(),
            total_errors,
            total_warnings,
        },
        project_validations,
    }
}

fn validate_project(project_index: usize, project: &ProjectRecord) -> ProjectValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut score = 0.0;

    if project.has_title() {
        score += TITLE_POINTS;
    } else {
        errors.push("Missing or invalid title".to_string());
    }

    if present(&project.client_name) || present(&project.client_email) {
        score += CLIENT_POINTS;
    } else {
        warnings.push("No client information found".to_string());
    }

    let description_chars = project.description.chars().count();
    if description_chars == 0 {
        warnings.push("No description found".to_string());
    } else if description_chars < MIN_DESCRIPTION_CHARS {
        warnings.push("Description is very short".to_string());
    } else {
        score += DESCRIPTION_POINTS;
    }

    if project.estimated_budget.is_some() {
        score += BUDGET_POINTS;
    } else {
        warnings.push("No budget information found".to_string());
    }

    if project.timeline.is_some() {
        score += TIMELINE_POINTS;
    } else {
        warnings.push("No timeline information found".to_string());
    }

    if project.deliverables.is_empty() {
        warnings.push("No deliverables found".to_string());
    } else {
        score += DELIVERABLES_POINTS;
    }

    ProjectValidation {
        project_index,
        errors,
        warnings,
        quality_score: f64::min(score, 1.0),
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
