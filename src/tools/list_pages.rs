use serde::Deserialize;

use crate::api::types::{AllPagesResponse, GeneratorPagesResponse};
use crate::api::WikiClient;
use crate::tools::{ToolContext, ToolResult};
use crate::utils::wiki_url::normalize_origin;

const CONTENT_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct ListPageTitlesParams {
    pub server: String,
    pub limit: Option<u32>,
    pub apcontinue: Option<String>,
    pub namespace: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListPagesWithContentParams {
    pub server: String,
    pub limit: Option<u32>,
    pub gapcontinue: Option<String>,
}

/// Paginated page-title listing via `list=allpages`.
pub async fn titles(
    wiki: &WikiClient,
    ctx: &ToolContext,
    params: ListPageTitlesParams,
) -> ToolResult {
    let origin = normalize_origin(&params.server);

    let mut form = vec![
        ("action", "query".to_owned()),
        ("list", "allpages".to_owned()),
        (
            "aplimit",
            params.limit.map(|l| l.to_string()).unwrap_or_else(|| "10".to_owned()),
        ),
        ("format", "json".to_owned()),
    ];
    if let Some(apcontinue) = &params.apcontinue {
        form.push(("apcontinue", apcontinue.clone()));
    }
    if let Some(namespace) = params.namespace {
        form.push(("apnamespace", namespace.to_string()));
    }

    let data: AllPagesResponse = match wiki.action_post(&origin, &form, ctx.cookie()).await {
        Ok(data) => data,
        Err(err) => return ToolResult::error(format!("Failed to retrieve page titles: {}", err)),
    };

    let pages = data.query.and_then(|q| q.allpages).unwrap_or_default();
    if pages.is_empty() {
        return ToolResult::ok(vec!["No pages found.".to_owned()]);
    }

    let mut content: Vec<String> = pages
        .iter()
        .map(|page| format!("Title: {} (PageID: {}, NS: {})", page.title, page.pageid, page.ns))
        .collect();

    if let Some(apcontinue) = data.cont.and_then(|c| c.apcontinue) {
        content.push(format!(
            "More results available, use apcontinue={} to continue.",
            apcontinue
        ));
    }

    ToolResult::ok(content)
}

/// Page listing with a content preview, via `generator=allpages` plus the
/// main revision slot of each page.
pub async fn with_content(
    wiki: &WikiClient,
    ctx: &ToolContext,
    params: ListPagesWithContentParams,
) -> ToolResult {
    let origin = normalize_origin(&params.server);

    let mut form = vec![
        ("action", "query".to_owned()),
        ("generator", "allpages".to_owned()),
        (
            "gaplimit",
            params.limit.map(|l| l.to_string()).unwrap_or_else(|| "10".to_owned()),
        ),
        ("prop", "revisions".to_owned()),
        ("rvslots", "*".to_owned()),
        ("rvprop", "content".to_owned()),
        ("format", "json".to_owned()),
    ];
    if let Some(gapcontinue) = &params.gapcontinue {
        form.push(("gapcontinue", gapcontinue.clone()));
    }

    let data: GeneratorPagesResponse = match wiki.action_post(&origin, &form, ctx.cookie()).await {
        Ok(data) => data,
        Err(err) => {
            return ToolResult::error(format!("Failed to retrieve pages with content: {}", err))
        }
    };

    let cont = data.cont.and_then(|c| c.gapcontinue);
    let pages = data.query.and_then(|q| q.pages).unwrap_or_default();
    if pages.is_empty() {
        return ToolResult::ok(vec!["No pages found.".to_owned()]);
    }

    let mut content: Vec<String> = pages
        .values()
        .map(|page| {
            let text = page
                .revisions
                .as_ref()
                .and_then(|revs| revs.first())
                .and_then(|rev| rev.slots.as_ref())
                .and_then(|slots| slots.main.as_ref())
                .and_then(|main| main.text())
                .unwrap_or("[No content]");
            [
                format!("Title: {}", page.title),
                format!("PageID: {}, NS: {}", page.pageid, page.ns),
                format!("Content:\n{}", preview(text)),
            ]
            .join("\n")
        })
        .collect();

    if let Some(gapcontinue) = cont {
        content.push(format!(
            "More results available, use gapcontinue={} to continue.",
            gapcontinue
        ));
    }

    ToolResult::ok(content)
}

fn preview(text: &str) -> String {
    if text.chars().count() <= CONTENT_PREVIEW_CHARS {
        return text.to_owned();
    }
    let head: String = text.chars().take(CONTENT_PREVIEW_CHARS).collect();
    format!("{}... [truncated]", head)
}
