use serde::Deserialize;

use crate::api::types::{PageHistoryResponse, Revision};
use crate::api::WikiClient;
use crate::tools::{or_na, ToolContext, ToolResult};
use crate::utils::wiki_url::normalize_origin;

#[derive(Debug, Deserialize)]
pub struct PageHistoryParams {
    pub server: String,
    pub title: String,
}

/// Latest revisions of a page from the REST history endpoint.
pub async fn run(wiki: &WikiClient, ctx: &ToolContext, params: PageHistoryParams) -> ToolResult {
    let origin = normalize_origin(&params.server);

    let data: PageHistoryResponse = match wiki
        .rest_get(
            &origin,
            &["v1", "page", &params.title, "history"],
            &[],
            ctx.cookie(),
        )
        .await
    {
        Ok(data) => data,
        Err(err) => return ToolResult::error(format!("Failed to retrieve page history: {}", err)),
    };

    if data.revisions.is_empty() {
        return ToolResult::ok(vec!["No revisions found for page".to_owned()]);
    }

    ToolResult::ok(data.revisions.iter().map(render_revision).collect())
}

fn render_revision(revision: &Revision) -> String {
    let user = revision.user.as_ref();
    [
        format!("Revision ID: {}", revision.id),
        format!("Timestamp: {}", or_na(revision.timestamp.as_deref())),
        format!(
            "User: {} (ID: {})",
            user.and_then(|u| u.name.as_deref()).unwrap_or("N/A"),
            or_na(user.and_then(|u| u.id)),
        ),
        format!("Comment: {}", or_na(revision.comment.as_deref())),
        format!("Size: {}", or_na(revision.size)),
        format!("Delta: {}", or_na(revision.delta)),
    ]
    .join("\n")
}
