use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};

use crate::server::extract::identity_from_headers;
use crate::server::AppState;
use crate::tools;
use crate::tools::{ToolContext, ToolResult};

/// One POST route per tool, mirroring the original tool names.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tools/get-page", post(get_page))
        .route("/tools/search-page", post(search_page))
        .route("/tools/list-page-titles", post(list_page_titles))
        .route("/tools/list-pages-with-content", post(list_pages_with_content))
        .route("/tools/get-page-history", post(get_page_history))
        .route("/tools/get-file", post(get_file))
        .route("/tools/create-page", post(create_page))
        .route("/tools/update-page", post(update_page))
        .route("/tools/batch-create-page", post(batch_create_page))
        .route("/tools/batch-update-page", post(batch_update_page))
}

fn context(headers: &HeaderMap) -> ToolContext {
    ToolContext::new(identity_from_headers(headers))
}

async fn get_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::get_page::GetPageParams>,
) -> Json<ToolResult> {
    Json(tools::get_page::run(&state.wiki, &context(&headers), params).await)
}

async fn search_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::search_page::SearchPageParams>,
) -> Json<ToolResult> {
    Json(tools::search_page::run(&state.wiki, &context(&headers), params).await)
}

async fn list_page_titles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::list_pages::ListPageTitlesParams>,
) -> Json<ToolResult> {
    Json(tools::list_pages::titles(&state.wiki, &context(&headers), params).await)
}

async fn list_pages_with_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::list_pages::ListPagesWithContentParams>,
) -> Json<ToolResult> {
    Json(tools::list_pages::with_content(&state.wiki, &context(&headers), params).await)
}

async fn get_page_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::page_history::PageHistoryParams>,
) -> Json<ToolResult> {
    Json(tools::page_history::run(&state.wiki, &context(&headers), params).await)
}

async fn get_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::get_file::GetFileParams>,
) -> Json<ToolResult> {
    Json(tools::get_file::run(&state.wiki, &context(&headers), params).await)
}

async fn create_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::create_page::CreatePageParams>,
) -> Json<ToolResult> {
    Json(tools::create_page::run(&state.manager, &state.wiki, &context(&headers), params).await)
}

async fn update_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::update_page::UpdatePageParams>,
) -> Json<ToolResult> {
    Json(tools::update_page::run(&state.manager, &state.wiki, &context(&headers), params).await)
}

async fn batch_create_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::batch::BatchCreateParams>,
) -> Json<ToolResult> {
    Json(tools::batch::create(&state.manager, &state.wiki, &context(&headers), params).await)
}

async fn batch_update_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<tools::batch::BatchUpdateParams>,
) -> Json<ToolResult> {
    Json(tools::batch::update(&state.manager, &state.wiki, &context(&headers), params).await)
}
