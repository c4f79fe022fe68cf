use serde::Deserialize;

use crate::api::types::EditResponse;
use crate::api::WikiClient;
use crate::tools::create_page::DEFAULT_CONTENT_MODEL;
use crate::tools::{or_na, ToolContext, ToolResult};
use crate::token::TokenManager;
use crate::utils::wiki_url::{normalize_origin, page_url};

/// Section selector for incremental edits: `"new"` appends a section, an
/// index targets one section, and `"all"` means the whole page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SectionRef {
    Index(i64),
    Name(String),
}

impl SectionRef {
    /// The `section` form parameter, or `None` when the whole page is meant.
    pub fn as_param(&self) -> Option<String> {
        match self {
            SectionRef::Index(index) => Some(index.to_string()),
            SectionRef::Name(name) if name == "all" => None,
            SectionRef::Name(name) => Some(name.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageParams {
    pub server: String,
    pub title: String,
    pub source: String,
    pub comment: Option<String>,
    pub section: Option<SectionRef>,
    pub content_model: Option<String>,
}

/// Update a page, or one section of it, via `action=edit`.
pub async fn run(
    manager: &TokenManager,
    wiki: &WikiClient,
    ctx: &ToolContext,
    params: UpdatePageParams,
) -> ToolResult {
    let Some(identity) = &ctx.identity else {
        return ToolResult::error("Failed to update page: no credentials in request");
    };
    let origin = normalize_origin(&params.server);

    let grant = match manager.get_token(&origin, identity).await {
        Ok(grant) => grant,
        Err(err) => return ToolResult::error(format!("Failed to update page: {}", err)),
    };

    let mut form = vec![
        ("action", "edit".to_owned()),
        ("title", params.title.clone()),
        ("text", params.source.clone()),
        (
            "summary",
            params
                .comment
                .clone()
                .unwrap_or_else(|| "Updated via wiki agent".to_owned()),
        ),
        ("format", "json".to_owned()),
        (
            "contentmodel",
            params
                .content_model
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_MODEL.to_owned()),
        ),
        ("token", grant.token.clone()),
    ];
    if let Some(section) = params.section.as_ref().and_then(SectionRef::as_param) {
        form.push(("section", section));
    }

    let data: EditResponse = match wiki
        .action_post(&origin, &form, grant.cookie.as_deref())
        .await
    {
        Ok(data) => data,
        Err(err) => return ToolResult::error(format!("Failed to update page: {}", err)),
    };

    if let Some(error) = data.error {
        return ToolResult::error(format!("Failed to update page: {}", error.info));
    }

    let edit = data.edit;
    ToolResult::ok(vec![
        format!(
            "Page updated successfully: {}",
            page_url(&origin, &params.title)
        ),
        [
            "Update result:".to_owned(),
            format!(
                "Result: {}",
                edit.as_ref()
                    .and_then(|e| e.result.clone())
                    .unwrap_or_else(|| "Success".to_owned())
            ),
            format!("Page ID: {}", or_na(edit.as_ref().and_then(|e| e.pageid))),
            format!("Title: {}", params.title),
            format!(
                "Old revision ID: {}",
                or_na(edit.as_ref().and_then(|e| e.oldrevid))
            ),
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
