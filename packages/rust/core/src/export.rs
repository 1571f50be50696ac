//! CSV export of extracted records.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{error, info, instrument};

use briefparse_shared::{BriefParseError, ProjectBatch, ProjectRecord, Result};

/// Separator used to flatten list fields into one cell.
pub const LIST_SEPARATOR: &str = "; ";

/// Header row; matches the field order of `CsvRow`.
pub const CSV_COLUMNS: [&str; 14] = [
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

/// One flat CSV row. Field order is the column order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    title: &'a str,
    client_name: Option<&'a str>,
    client_email: Option<&'a str>,
    client_company: Option<&'a str>,
    description: &'a str,
    estimated_budget: Option<u64>,
    timeline: Option<u32>,
    industry: &'static str,
    priority: &'static str,
    status: &'static str,
    platform: Option<&'a str>,
    deadline: Option<&'a str>,
    deliverables: String,
    tags: String,
}

impl<'a> From<&'a ProjectRecord> for CsvRow<'a> {
    fn from(project: &'a ProjectRecord) -> Self {
        Self {
            title: &project.title,
            client_name: project.client_name.as_deref(),
            client_email: project.client_email.as_deref(),
            client_company: project.client_company.as_deref(),
            description: &project.description,
            estimated_budget: project.estimated_budget,
            timeline: project.timeline,
            industry: project.industry.as_str(),
            priority: project.priority.as_str(),
            status: project.status.as_str(),
            platform: project.platform.as_deref(),
            deadline: project.deadline.as_deref(),
            deliverables: project.deliverables.as_slice().join(LIST_SEPARATOR),
            tags: project.tags.as_slice().join(LIST_SEPARATOR),
        }
    }
}

/// Write a header row plus one row per record. The header is written even
/// when `projects` is empty.
pub fn write_csv<W: Write>(projects: &[ProjectRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_COLUMNS)
        .map_err(|e| BriefParseError::Export(e.to_string()))?;
    for project in projects {
        wtr.serialize(CsvRow::from(project))
            .map_err(|e| BriefParseError::Export(e.to_string()))?;
    }
    wtr.flush()
        .map_err(|e| BriefParseError::Export(e.to_string()))?;
    Ok(())
}

/// Write `result` to a CSV file at `path`.
///
/// Returns `false` (and logs why) for failed or empty results and for any
/// write error; never returns an error.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn export_csv<R: ProjectBatch + ?Sized>(result: &R, path: &Path) -> bool {
    let projects = result.projects();
    if !result.succeeded() || projects.is_empty() {
        error!("nothing to export: result failed or has no projects");
        return false;
    }

    match write_file(projects, path) {
        Ok(()) => {
            info!(rows = projects.len(), "CSV written");
            true
        }
        Err(e) => {
            error!(error = %e, "CSV export failed");
            false
        }
    }
}

fn write_file(projects: &[ProjectRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| BriefParseError::io(path, e))?;
    write_csv(projects, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefparse_shared::ExtractionResult;

    fn project() -> ProjectRecord {
        serde_json::from_value(serde_json::json!({
            "title": "Shop, Relaunch",
            "clientEmail": "a@b.com",
            "estimatedBudget": 25000,
            "industry": "real estate",
            "deliverables": ["Catalog", "Cart"],
            "tags": ["web", "shopify", "launch"]
        }))
        .unwrap()
    }

    fn render(projects: &[ProjectRecord]) -> String {
        let mut buf = Vec::new();
        write_csv(projects, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_follows_column_order() {
        let out = render(&[project()]);
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "title,clientName,clientEmail,clientCompany,description,estimatedBudget,timeline,\
             industry,priority,status,platform,deadline,deliverables,tags"
        );
    }

    #[test]
    fn test_empty_batch_still_has_header() {
        let out = render(&[]);
        assert_eq!(out, format!("{}\n", CSV_COLUMNS.join(",")));
    }

    #[test]
    fn test_lists_joined_and_options_blank() {
        let out = render(&[project()]);
        let row = out.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"Shop, Relaunch\",,a@b.com,,,25000,,real estate,medium,discovery,,,Catalog; Cart,web; shopify; launch"
        );
    }

    #[test]
    fn test_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("briefparse-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("projects.csv");

        let result = ExtractionResult::single(
            project(),
            "text",
            0.5,
            briefparse_shared::Language::En,
        );
        assert!(export_csv(&result, &path));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.contains("Catalog; Cart"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_combined_result() {
        let dir = std::env::temp_dir().join(format!("briefparse-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("combined.csv");

        let single = |source: &str| {
            ExtractionResult::single(project(), source, 0.5, briefparse_shared::Language::En)
        };
        let combined = crate::aggregate::combine(vec![single("text"), single("email")], 2);
        assert!(export_csv(&combined, &path));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_refuses_failed_result() {
        let path = std::env::temp_dir().join("briefparse-never-written.csv");
        assert!(!export_csv(&ExtractionResult::failure("x"), &path));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_reports_unwritable_path() {
        let result = ExtractionResult::single(
            project(),
            "text",
            0.5,
            briefparse_shared::Language::En,
        );
        let path = Path::new("/nonexistent-dir/briefparse/projects.csv");
        assert!(!export_csv(&result, path));
    }
}
