pub mod constants;
pub mod logging;
pub mod wiki_url;
