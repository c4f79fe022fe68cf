use serde::Deserialize;

use crate::api::types::EditResponse;
use crate::api::WikiClient;
use crate::tools::{or_na, ToolContext, ToolResult};
use crate::token::TokenManager;
use crate::utils::wiki_url::{normalize_origin, page_url};

pub const DEFAULT_CONTENT_MODEL: &str = "wikitext";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageParams {
    pub server: String,
    pub title: String,
    pub source: String,
    pub comment: Option<String>,
    pub content_model: Option<String>,
}

/// Create a wiki page via `action=edit` with `createonly`, so an existing
/// page is never overwritten by accident.
pub async fn run(
    manager: &TokenManager,
    wiki: &WikiClient,
    ctx: &ToolContext,
    params: CreatePageParams,
) -> ToolResult {
    let Some(identity) = &ctx.identity else {
        return ToolResult::error("Failed to create page: no credentials in request");
    };
    let origin = normalize_origin(&params.server);

    let grant = match manager.get_token(&origin, identity).await {
        Ok(grant) => grant,
        Err(err) => return ToolResult::error(format!("Failed to create page: {}", err)),
    };

    let form = [
        ("action", "edit".to_owned()),
        ("title", params.title.clone()),
        ("text", params.source.clone()),
        (
            "summary",
            params
                .comment
                .clone()
                .unwrap_or_else(|| "Created via wiki agent".to_owned()),
        ),
        ("createonly", "true".to_owned()),
        (
            "contentmodel",
            params
                .content_model
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_MODEL.to_owned()),
        ),
        ("token", grant.token.clone()),
        ("format", "json".to_owned()),
    ];

    let data: EditResponse = match wiki
        .action_post(&origin, &form, grant.cookie.as_deref())
        .await
    {
        Ok(data) => data,
        Err(err) => return ToolResult::error(format!("Failed to create page: {}", err)),
    };

    if let Some(error) = data.error {
        return ToolResult::error(format!("Failed to create page: {}", error.info));
    }

    let edit = data.edit;
    ToolResult::ok(vec![
        format!(
            "Page created successfully: {}",
            page_url(&origin, &params.title)
        ),
        [
            "Create result:".to_owned(),
            format!(
                "Result: {}",
                edit.as_ref()
                    .and_then(|e| e.result.clone())
                    .unwrap_or_else(|| "Success".to_owned())
            ),
            format!("Page ID: {}", or_na(edit.as_ref().and_then(|e| e.pageid))),
            format!("Title: {}", params.title),
            format!(
                "New revision ID: {}",
                or_na(edit.as_ref().and_then(|e| e.newrevid))
            ),
            format!(
                "Timestamp: {}",
                or_na(edit.as_ref().and_then(|e| e.newtimestamp.as_deref()))
            ),
        ]
        .join("\n"),
    ])
}
