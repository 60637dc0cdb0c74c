//! `docuflow status` - inspect documents and their outputs.

use console::style;

use crate::cli::helpers::AppContext;
use crate::config::Settings;
use crate::models::DocumentStatus;

pub async fn cmd_status(settings: &Settings, id: Option<&str>) -> anyhow::Result<()> {
    let ctx = AppContext::new(settings);

    match id {
        Some(id) => {
            let Some(record) = ctx.documents.get(id).await? else {
                println!("{} Document not found: {id}", style("!").yellow());
                return Ok(());
            };

            println!("{}", style(format!("Document {}", record.document_id)).bold());
            println!("{}", "-".repeat(40));
            println!("  Object:     {}/{}", record.bucket_name, record.object_name);
            if let Some(department) = &record.department {
                println!("  Department: {department}");
            }
            println!("  Status:     {}", styled_status(record.document_status));
            println!("  Created:    {}", record.document_created_on.to_rfc3339());
            if let Some(completed) = record.document_completed_on {
                println!("  Completed:  {}", completed.to_rfc3339());
            }

            let outputs = ctx.outputs.list_for_document(id).await?;
            if outputs.is_empty() {
                println!("\n  No outputs registered");
            } else {
                println!("\n  Outputs ({}):", outputs.len());
                for output in outputs {
                    println!("    {:24} {}", output.output_type.to_string(), output.output_path);
                }
            }
        }
        None => {
            let records = ctx.documents.list().await?;
            if records.is_empty() {
                println!("{} No documents ingested", style("!").yellow());
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  {}  {}/{}",
                    style(&record.document_id).cyan(),
                    styled_status(record.document_status),
                    record.bucket_name,
                    record.object_name,
                );
            }
        }
    }
    Ok(())
}

fn styled_status(status: DocumentStatus) -> String {
    match status {
        DocumentStatus::Completed => style("COMPLETED").green().to_string(),
        DocumentStatus::InProgress => style("IN_PROGRESS").yellow().to_string(),
    }
}
