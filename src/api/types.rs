//! Remote wiki API response shapes.
//!
//! Fields the tools display are kept optional where the remote side is
//! known to omit them; unknown fields are ignored.

use std::collections::HashMap;

use serde::Deserialize;

/// ================================
/// Action API: edits
/// ================================
#[derive(Debug, Deserialize)]
pub struct EditResponse {
    pub edit: Option<EditResult>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct EditResult {
    pub result: Option<String>,
    pub pageid: Option<i64>,
    pub title: Option<String>,
    pub oldrevid: Option<i64>,
    pub newrevid: Option<i64>,
    pub newtimestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub info: String,
}

/// ================================
/// Action API: listings
/// ================================
#[derive(Debug, Deserialize)]
pub struct AllPagesResponse {
    pub query: Option<AllPagesQuery>,
    #[serde(rename = "continue")]
    pub cont: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
pub struct AllPagesQuery {
    pub allpages: Option<Vec<PageRef>>,
}

#[derive(Debug, Deserialize)]
pub struct PageRef {
    pub pageid: i64,
    pub ns: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct Continuation {
    pub apcontinue: Option<String>,
    pub gapcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratorPagesResponse {
    pub query: Option<GeneratorPagesQuery>,
    #[serde(rename = "continue")]
    pub cont: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratorPagesQuery {
    pub pages: Option<HashMap<String, GeneratorPage>>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratorPage {
    pub pageid: i64,
    pub ns: i64,
    pub title: String,
    pub revisions: Option<Vec<RevisionSlots>>,
}

#[derive(Debug, Deserialize)]
pub struct RevisionSlots {
    pub slots: Option<Slots>,
}

#[derive(Debug, Deserialize)]
pub struct Slots {
    pub main: Option<MainSlot>,
}

/// Older wikis return the content under `*`, newer ones under `content`.
#[derive(Debug, Deserialize)]
pub struct MainSlot {
    #[serde(rename = "*")]
    pub star: Option<String>,
    pub content: Option<String>,
}

impl MainSlot {
    pub fn text(&self) -> Option<&str> {
        self.star.as_deref().or(self.content.as_deref())
    }
}

/// ================================
/// Action API: parse (section listing)
/// ================================
#[derive(Debug, Deserialize)]
pub struct ParseSectionsResponse {
    pub parse: Option<ParsedSections>,
}

#[derive(Debug, Deserialize)]
pub struct ParsedSections {
    #[serde(default)]
    pub sections: Vec<ParsedSection>,
}

#[derive(Debug, Deserialize)]
pub struct ParsedSection {
    pub line: Option<String>,
}

/// ================================
/// REST API objects
/// ================================
#[derive(Debug, Deserialize)]
pub struct RestPage {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchPageResponse {
    #[serde(default)]
    pub pages: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageHistoryResponse {
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

#[derive(Debug, Deserialize)]
pub struct Revision {
    pub id: i64,
    pub timestamp: Option<String>,
    pub user: Option<RevisionUser>,
    pub comment: Option<String>,
    pub size: Option<i64>,
    pub delta: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RevisionUser {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestFile {
    pub title: Option<String>,
    pub file_description_url: Option<String>,
    pub latest: Option<FileRevision>,
    pub preferred: Option<FileVariant>,
    pub original: Option<FileVariant>,
    pub thumbnail: Option<FileVariant>,
}

#[derive(Debug, Deserialize)]
pub struct FileRevision {
    pub timestamp: Option<String>,
    pub user: Option<RevisionUser>,
}

#[derive(Debug, Deserialize)]
pub struct FileVariant {
    pub url: Option<String>,
}
