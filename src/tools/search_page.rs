use serde::Deserialize;

use crate::api::types::{SearchPageResponse, SearchResult};
use crate::api::WikiClient;
use crate::tools::{ToolContext, ToolResult};
use crate::utils::wiki_url::normalize_origin;

#[derive(Debug, Deserialize)]
pub struct SearchPageParams {
    pub server: String,
    pub query: String,
    pub limit: Option<u32>,
}

/// Search page titles and contents via the REST search endpoint.
pub async fn run(wiki: &WikiClient, ctx: &ToolContext, params: SearchPageParams) -> ToolResult {
    let origin = normalize_origin(&params.server);

    let mut query = vec![("q", params.query.clone())];
    if let Some(limit) = params.limit {
        query.push(("limit", limit.to_string()));
    }

    let data: SearchPageResponse = match wiki
        .rest_get(&origin, &["v1", "search", "page"], &query, ctx.cookie())
        .await
    {
        Ok(data) => data,
        Err(err) => return ToolResult::error(format!("Failed to retrieve search data: {}", err)),
    };

    if data.pages.is_empty() {
        return ToolResult::ok(vec![format!("No pages found for {}", params.query)]);
    }

    ToolResult::ok(
        data.pages
            .iter()
            .map(|page| render_result(&origin, page))
            .collect(),
    )
}

fn render_result(origin: &str, result: &SearchResult) -> String {
    [
        format!("Title: {}", result.title),
        format!(
            "Description: {}",
            result.description.as_deref().unwrap_or("Not available")
        ),
        format!("Page ID: {}", result.id),
        format!("Page URL: {}{}", origin, result.key),
        format!(
            "Thumbnail URL: {}",
            result
                .thumbnail
                .as_ref()
                .and_then(|thumb| thumb.url.as_deref())
                .unwrap_or("Not available")
        ),
    ]
    .join("\n")
}
