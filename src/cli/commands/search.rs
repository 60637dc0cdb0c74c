//! `docuflow search` - keyword lookup in the local index.

use console::style;

use crate::cli::helpers::AppContext;
use crate::config::Settings;

pub async fn cmd_search(settings: &Settings, keyword: &str) -> anyhow::Result<()> {
    let ctx = AppContext::new(settings);
    let hits = ctx.search.search(&settings.index_name, keyword).await?;

    if hits.is_empty() {
        println!("{} No matches for '{keyword}'", style("!").yellow());
        return Ok(());
    }

    println!("{}", style(format!("{} match(es) for '{keyword}'", hits.len())).bold());
    for hit in hits {
        println!(
            "{}  {}/{}  {} occurrence{}",
            style(&hit.document_id).cyan(),
            hit.bucket_name,
            hit.document_name,
            hit.count,
            if hit.count == 1 { "" } else { "s" },
        );
    }
    Ok(())
}
