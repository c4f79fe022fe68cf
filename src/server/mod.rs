pub mod extract;
pub mod routes;
pub mod server;

pub use server::{start, AppState};
