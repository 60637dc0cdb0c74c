//! `docuflow ingest` - register an uploaded object for analysis.

use console::style;

use crate::cli::helpers::AppContext;
use crate::config::Settings;
use crate::services::IngestService;

pub async fn cmd_ingest(
    settings: &Settings,
    bucket: &str,
    object: &str,
    department: Option<String>,
) -> anyhow::Result<()> {
    let ctx = AppContext::new(settings);
    let service = IngestService::new(ctx.documents.clone(), ctx.queue.clone());

    let document_id = service.ingest(bucket, object, department).await?;

    println!(
        "{} Ingested {}/{}",
        style("✓").green(),
        bucket,
        object
    );
    println!("  Document id: {}", style(&document_id).cyan());
    println!("  Status: IN_PROGRESS, job-start message queued");
    Ok(())
}
