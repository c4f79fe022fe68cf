// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Token-query response body in the shape the remote wiki returns.
pub fn token_body(token: &str) -> serde_json::Value {
    json!({ "query": { "tokens": { "csrftoken": token } } })
}

/// Origin URL (with trailing slash) for a spawned mock wiki.
pub fn wiki_origin(addr: SocketAddr) -> String {
    format!("http://{}/", addr)
}
