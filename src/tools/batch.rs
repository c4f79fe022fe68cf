//! Batch page edits.
//!
//! One token grant covers the whole batch: if authentication is
//! unavailable the batch aborts before touching any page, while a per-page
//! API error is recorded and does not stop the remaining pages.

use serde::Deserialize;
use tracing::info;

use crate::api::types::EditResponse;
use crate::api::WikiClient;
use crate::tools::create_page::DEFAULT_CONTENT_MODEL;
use crate::tools::update_page::SectionRef;
use crate::tools::{or_na, ToolContext, ToolResult};
use crate::token::{TokenGrant, TokenManager};
use crate::utils::wiki_url::{normalize_origin, page_url};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCreateInput {
    pub title: String,
    pub source: String,
    pub comment: Option<String>,
    pub content_model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUpdateInput {
    pub title: String,
    pub source: String,
    pub comment: Option<String>,
    pub section: Option<SectionRef>,
    pub content_model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchCreateParams {
    pub server: String,
    pub pages: Vec<PageCreateInput>,
}

#[derive(Debug, Deserialize)]
pub struct BatchUpdateParams {
    pub server: String,
    pub pages: Vec<PageUpdateInput>,
}

struct PageOutcome {
    title: String,
    success: bool,
    message: String,
    edit: Option<EditResponse>,
}

pub async fn create(
    manager: &TokenManager,
    wiki: &WikiClient,
    ctx: &ToolContext,
    params: BatchCreateParams,
) -> ToolResult {
    let origin = normalize_origin(&params.server);
    let grant = match batch_grant(manager, ctx, &origin).await {
        Ok(grant) => grant,
        Err(message) => {
            return ToolResult::error(format!("Failed to batch create pages: {}", message))
        }
    };

    let mut outcomes = Vec::with_capacity(params.pages.len());
    for page in &params.pages {
        let form = [
            ("action", "edit".to_owned()),
            ("title", page.title.clone()),
            ("text", page.source.clone()),
            (
                "summary",
                page.comment
                    .clone()
                    .unwrap_or_else(|| "Created via wiki agent (batch)".to_owned()),
            ),
            ("createonly", "true".to_owned()),
            (
                "contentmodel",
                page.content_model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CONTENT_MODEL.to_owned()),
            ),
            ("token", grant.token.clone()),
            ("format", "json".to_owned()),
        ];
        outcomes.push(submit_edit(wiki, &origin, &grant, &page.title, &form, "Created").await);
    }

    render_outcomes("create", &origin, outcomes)
}

pub async fn update(
    manager: &TokenManager,
    wiki: &WikiClient,
    ctx: &ToolContext,
    params: BatchUpdateParams,
) -> ToolResult {
    let origin = normalize_origin(&params.server);
    let grant = match batch_grant(manager, ctx, &origin).await {
        Ok(grant) => grant,
        Err(message) => {
            return ToolResult::error(format!("Failed to batch update pages: {}", message))
        }
    };

    let mut outcomes = Vec::with_capacity(params.pages.len());
    for page in &params.pages {
        let mut form = vec![
            ("action", "edit".to_owned()),
            ("title", page.title.clone()),
            ("text", page.source.clone()),
            (
                "summary",
                page.comment
                    .clone()
                    .unwrap_or_else(|| "Updated via wiki agent (batch)".to_owned()),
            ),
            ("format", "json".to_owned()),
            (
                "contentmodel",
                page.content_model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CONTENT_MODEL.to_owned()),
            ),
            ("token", grant.token.clone()),
        ];
        if let Some(section) = page.section.as_ref().and_then(SectionRef::as_param) {
            form.push(("section", section));
        }
        outcomes.push(submit_edit(wiki, &origin, &grant, &page.title, &form, "Updated").await);
    }

    render_outcomes("update", &origin, outcomes)
}

async fn batch_grant(
    manager: &TokenManager,
    ctx: &ToolContext,
    origin: &str,
) -> Result<TokenGrant, String> {
    let Some(identity) = &ctx.identity else {
        return Err("no credentials in request".to_owned());
    };
    manager
        .get_token(origin, identity)
        .await
        .map_err(|err| err.to_string())
}

async fn submit_edit(
    wiki: &WikiClient,
    origin: &str,
    grant: &TokenGrant,
    title: &str,
    form: &[(&str, String)],
    verb: &str,
) -> PageOutcome {
    match wiki
        .action_post::<EditResponse>(origin, form, grant.cookie.as_deref())
        .await
    {
        Ok(data) => match &data.error {
            Some(error) => PageOutcome {
                title: title.to_owned(),
                success: false,
                message: error.info.clone(),
                edit: Some(data),
            },
            None => PageOutcome {
                title: title.to_owned(),
                success: true,
                message: format!("{} successfully", verb),
                edit: Some(data),
            },
        },
        Err(err) => PageOutcome {
            title: title.to_owned(),
            success: false,
            message: err.to_string(),
            edit: None,
        },
    }
}

fn render_outcomes(kind: &str, origin: &str, outcomes: Vec<PageOutcome>) -> ToolResult {
    let succeeded = outcomes.iter().filter(|o| o.success).count();
    let failed = outcomes.len() - succeeded;
    info!("batch {} finished: {} succeeded, {} failed", kind, succeeded, failed);

    let mut lines = vec![
        format!(
            "Batch {} completed: {} succeeded, {} failed",
            kind, succeeded, failed
        ),
        String::new(),
        "Results:".to_owned(),
    ];

    for outcome in &outcomes {
        let status = if outcome.success { "ok" } else { "failed" };
        lines.push(format!("[{}] {}", status, outcome.title));
        lines.push(format!("  Message: {}", outcome.message));
        if outcome.success {
            if let Some(edit) = outcome.edit.as_ref().and_then(|data| data.edit.as_ref()) {
                lines.push(format!("  URL: {}", page_url(origin, &outcome.title)));
                lines.push(format!("  Page ID: {}", or_na(edit.pageid)));
                lines.push(format!("  Old revision: {}", or_na(edit.oldrevid)));
                lines.push(format!("  New revision: {}", or_na(edit.newrevid)));
            }
        }
    }

    ToolResult::ok(vec![lines.join("\n")])
}
