use serde::Deserialize;

use crate::api::types::RestFile;
use crate::api::WikiClient;
use crate::tools::{or_na, ToolContext, ToolResult};
use crate::utils::wiki_url::normalize_origin;

#[derive(Debug, Deserialize)]
pub struct GetFileParams {
    pub server: String,
    pub title: String,
}

/// File descriptor (description URL plus preferred/original/thumbnail
/// variants) from the REST file endpoint.
pub async fn run(wiki: &WikiClient, ctx: &ToolContext, params: GetFileParams) -> ToolResult {
    let origin = normalize_origin(&params.server);

    let file: RestFile = match wiki
        .rest_get(&origin, &["v1", "file", &params.title], &[], ctx.cookie())
        .await
    {
        Ok(file) => file,
        Err(err) => return ToolResult::error(format!("Failed to retrieve file data: {}", err)),
    };

    let latest = file.latest.as_ref();
    ToolResult::ok(vec![[
        format!("File title: {}", or_na(file.title.as_deref())),
        format!(
            "File description URL: {}",
            or_na(file.file_description_url.as_deref())
        ),
        format!(
            "Latest revision timestamp: {}",
            or_na(latest.and_then(|rev| rev.timestamp.as_deref()))
        ),
        format!(
            "Latest revision user: {}",
            or_na(latest.and_then(|rev| rev.user.as_ref()).and_then(|user| user.name.as_deref()))
        ),
        format!(
            "Preferred URL: {}",
            or_na(file.preferred.as_ref().and_then(|v| v.url.as_deref()))
        ),
        format!(
            "Original URL: {}",
            or_na(file.original.as_ref().and_then(|v| v.url.as_deref()))
        ),
        format!(
            "Thumbnail URL: {}",
            or_na(file.thumbnail.as_ref().and_then(|v| v.url.as_deref()))
        ),
    ]
    .join("\n")])
}
