//! Assembly of a paginated result set into one logical response.
//!
//! Result pages form a lazy, finite, non-restartable sequence terminated by
//! the absence of a continuation token. The sequence is consumed by an
//! ordered fold that concatenates block batches in fetch order; any single
//! fetch failure aborts the whole assembly and no partial result escapes.

use futures::stream::{self, TryStreamExt};

use crate::analysis::blocks::ResultsPage;
use crate::clients::{AnalysisClient, ClientError};

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Pull every result page for `job_id` and concatenate the block lists.
///
/// The returned response carries the first page's document metadata, the
/// full block list, and no continuation token.
pub async fn fetch_full_results(
    client: &dyn AnalysisClient,
    job_id: &str,
) -> Result<ResultsPage, ClientError> {
    let batches = stream::try_unfold(Cursor::Start, move |cursor| async move {
        let token = match cursor {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return Ok(None),
        };
        let page = client.get_results(job_id, token.as_deref()).await?;
        tracing::debug!(
            job_id,
            blocks = page.blocks.len(),
            has_next = page.next_token.is_some(),
            "fetched result page"
        );
        let cursor = match &page.next_token {
            Some(token) => Cursor::Next(token.clone()),
            None => Cursor::Done,
        };
        Ok::<_, ClientError>(Some((page, cursor)))
    });

    let mut full = batches
        .try_fold(ResultsPage::default(), |mut full, mut page| async move {
            if full.document_metadata.is_none() {
                full.document_metadata = page.document_metadata.take();
            }
            full.blocks.append(&mut page.blocks);
            Ok(full)
        })
        .await?;
    full.next_token = None;
    Ok(full)
}
