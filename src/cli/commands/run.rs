//! `docuflow run` - drain the job queue through the full pipeline.
//!
//! Each queued job-start message is submitted against the fixture analysis
//! client; the fixture completes immediately, so the synthesized SUCCEEDED
//! notification is fed straight into the completion pipeline. In a
//! deployment the notification arrives out-of-band instead.

use std::path::Path;
use std::sync::Arc;

use console::style;

use crate::cli::helpers::AppContext;
use crate::clients::FixtureAnalysisClient;
use crate::config::Settings;
use crate::models::{CompletionNotification, DocumentLocation, JobStatus};
use crate::services::{
    AnnotationService, CompletionOutcome, CompletionService, IndexService, SubmitService,
};

pub async fn cmd_run(
    settings: &Settings,
    fixture: &Path,
    page_size: Option<usize>,
) -> anyhow::Result<()> {
    let ctx = AppContext::new(settings);
    let analysis = Arc::new(FixtureAnalysisClient::from_file(
        fixture,
        page_size.unwrap_or(settings.results_page_size),
    )?);

    let submitter = SubmitService::new(analysis.clone());
    let completion = CompletionService::new(
        ctx.documents.clone(),
        ctx.outputs.clone(),
        ctx.artifacts.clone(),
        analysis.clone(),
        AnnotationService::new(
            Arc::new(crate::clients::StaticEntityDetector::default()),
            ctx.artifacts.clone(),
            ctx.outputs.clone(),
        ),
        IndexService::new(
            ctx.search.clone(),
            ctx.documents.clone(),
            settings.index_name.clone(),
        ),
    );

    let mut processed = 0usize;
    let mut failed = 0usize;

    while let Some(message) = ctx.queue.receive().await? {
        tracing::info!(message_id = %message.message_id, "processing queued message");
        match process_message(&submitter, &completion, &message.body).await {
            Ok(outcome) => {
                processed += 1;
                report(&outcome);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(message_id = %message.message_id, error = %e, "message failed");
                println!("{} Message {} failed: {e:#}", style("✗").red(), message.message_id);
            }
        }
    }

    if processed == 0 && failed == 0 {
        println!("{} Queue is empty", style("!").yellow());
        return Ok(());
    }

    println!(
        "\n{} {processed} processed, {failed} failed",
        style("Done:").bold()
    );
    if failed > 0 {
        anyhow::bail!("{failed} message(s) failed");
    }
    Ok(())
}

async fn process_message(
    submitter: &SubmitService,
    completion: &CompletionService,
    body: &str,
) -> anyhow::Result<CompletionOutcome> {
    let (job_id, message) = submitter.process(body).await?;

    let notification = CompletionNotification {
        job_id,
        job_tag: message.document_id,
        status: JobStatus::Succeeded,
        document_location: DocumentLocation {
            bucket: message.bucket_name,
            object_name: message.object_name,
        },
    };
    completion
        .process(&serde_json::to_string(&notification)?)
        .await
}

fn report(outcome: &CompletionOutcome) {
    match outcome {
        CompletionOutcome::Completed {
            document_id,
            forms,
            tables,
            entities_detected,
        } => {
            println!("{} Completed {}", style("✓").green(), style(document_id).cyan());
            println!(
                "  forms: {forms}, tables: {tables}, entities: {}",
                if *entities_detected { "yes" } else { "no" }
            );
        }
        CompletionOutcome::Skipped { status } => {
            println!("{} Skipped notification with status {status:?}", style("!").yellow());
        }
    }
}
