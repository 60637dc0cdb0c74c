//! Structured extraction: flat text, per-page form tables, per-table grids.
//!
//! Cell and field texts are used verbatim; commas inside values are not
//! quoted or escaped, so consumers of the CSV artifacts must tolerate
//! ambiguous column boundaries. Known inherited limitation.

use anyhow::Result;

use crate::analysis::{AnalyzedDocument, AnalyzedPage, AnalyzedTable};
use crate::clients::ArtifactStore;
use crate::models::{OutputRecord, OutputType};
use crate::repository::OutputRepository;

/// Concatenate every line across all pages, page then line order,
/// space-joined. This is the canonical document content used for indexing
/// and entity detection.
pub fn document_text(document: &AnalyzedDocument) -> String {
    document
        .pages
        .iter()
        .flat_map(|page| page.lines.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a page's form as a two-row CSV: keys, then values.
///
/// A missing value renders as an empty cell. Returns `None` for a page
/// with no detected fields; no artifact is produced for it.
pub fn render_form_csv(page: &AnalyzedPage) -> Option<String> {
    if page.fields.is_empty() {
        return None;
    }
    let keys: Vec<&str> = page.fields.iter().map(|f| f.key.as_str()).collect();
    let values: Vec<&str> = page
        .fields
        .iter()
        .map(|f| f.value.as_deref().unwrap_or(""))
        .collect();
    Some(format!("{}\n{}\n", keys.join(","), values.join(",")))
}

/// Render a table as CSV: one comma-joined row per detected row.
pub fn render_table_csv(table: &AnalyzedTable) -> String {
    let mut csv = String::new();
    for row in &table.rows {
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

/// Persist one form artifact per page with detected fields and register a
/// `FORM-<page>` output for each. Pages without fields are skipped but do
/// not stop extraction for later pages.
pub async fn store_forms(
    document_id: &str,
    bucket: &str,
    document: &AnalyzedDocument,
    artifacts: &dyn ArtifactStore,
    outputs: &dyn OutputRepository,
) -> Result<usize> {
    let mut stored = 0;
    for page in &document.pages {
        let Some(csv) = render_form_csv(page) else {
            continue;
        };
        let path = format!("{document_id}/form-{}.csv", page.page_number);
        artifacts.put(bucket, &path, csv.as_bytes()).await?;
        outputs
            .create(OutputRecord::new(
                document_id.to_string(),
                OutputType::Form {
                    page: page.page_number,
                },
                path,
            ))
            .await?;
        stored += 1;
    }
    tracing::info!(document_id, forms = stored, "stored form artifacts");
    Ok(stored)
}

/// Persist one artifact per detected table and register a
/// `TABLE-<page>-<index>` output for each; indices are 1-based and reset
/// per page.
pub async fn store_tables(
    document_id: &str,
    bucket: &str,
    document: &AnalyzedDocument,
    artifacts: &dyn ArtifactStore,
    outputs: &dyn OutputRepository,
) -> Result<usize> {
    let mut stored = 0;
    for page in &document.pages {
        for (offset, table) in page.tables.iter().enumerate() {
            let index = offset as u32 + 1;
            let path = format!("{document_id}/table-{}-{index}.csv", page.page_number);
            let csv = render_table_csv(table);
            artifacts.put(bucket, &path, csv.as_bytes()).await?;
            outputs
                .create(OutputRecord::new(
                    document_id.to_string(),
                    OutputType::Table {
                        page: page.page_number,
                        index,
                    },
                    path,
                ))
                .await?;
            stored += 1;
        }
    }
    tracing::info!(document_id, tables = stored, "stored table artifacts");
    Ok(stored)
}
