use serde::Deserialize;
use tracing::debug;

use crate::api::types::{ParseSectionsResponse, RestPage};
use crate::api::WikiClient;
use crate::tools::{or_na, ToolContext, ToolResult};
use crate::utils::wiki_url::normalize_origin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentFormat {
    NoContent,
    #[default]
    WithSource,
    WithHtml,
}

#[derive(Debug, Deserialize)]
pub struct GetPageParams {
    pub server: String,
    pub title: String,
    #[serde(default)]
    pub content: ContentFormat,
}

/// Fetch the standard REST page object, plus a best-effort section listing
/// so callers can target section edits.
pub async fn run(wiki: &WikiClient, ctx: &ToolContext, params: GetPageParams) -> ToolResult {
    let origin = normalize_origin(&params.server);

    let segments: Vec<&str> = match params.content {
        ContentFormat::NoContent => vec!["v1", "page", &params.title, "bare"],
        ContentFormat::WithSource => vec!["v1", "page", &params.title],
        ContentFormat::WithHtml => vec!["v1", "page", &params.title, "with_html"],
    };

    let page: RestPage = match wiki.rest_get(&origin, &segments, &[], ctx.cookie()).await {
        Ok(page) => page,
        Err(err) => return ToolResult::error(format!("Failed to retrieve page data: {}", err)),
    };

    // Section listing failures do not fail the whole lookup.
    let sections = fetch_sections(wiki, &origin, &params.title)
        .await
        .unwrap_or_default();
    let section_list = sections
        .iter()
        .enumerate()
        .map(|(index, line)| format!("{}[index:{}]", line, index))
        .collect::<Vec<_>>()
        .join(", ");

    let mut content = vec![[
        format!("Page ID: {}", or_na(page.id)),
        format!("Title: {}", or_na(page.title)),
        format!("Sections: {}", section_list),
    ]
    .join("\n")];

    if let Some(source) = page.source {
        content.push(format!("Source:\n{}", source));
    }
    if let Some(html) = page.html {
        content.push(format!("HTML:\n{}", html));
    }

    ToolResult::ok(content)
}

async fn fetch_sections(
    wiki: &WikiClient,
    origin: &str,
    title: &str,
) -> anyhow::Result<Vec<String>> {
    let query = [
        ("action", "parse".to_owned()),
        ("page", title.to_owned()),
        ("prop", "sections".to_owned()),
        ("format", "json".to_owned()),
    ];
    let response: ParseSectionsResponse = wiki.action_get(origin, &query).await?;
    let sections: Vec<String> = response
        .parse
        .map(|parsed| parsed.sections.into_iter().filter_map(|s| s.line).collect())
        .unwrap_or_default();
    debug!("fetched {} section lines for '{}'", sections.len(), title);
    Ok(sections)
}
