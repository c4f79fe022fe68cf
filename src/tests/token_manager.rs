#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::{AppendHeaders, IntoResponse};
    use axum::routing::post;
    use axum::{Json, Router};
    use chrono::Utc;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use reqwest::Client;
    use serde_json::json;

    use crate::auth::{AuthError, AuthIdentity};
    use crate::tests::common::{spawn_axum, token_body, wiki_origin};
    use crate::token::{TokenManager, TokenRecord};
    use crate::utils::constants::TOKEN_TTL_SECS;

    fn manager() -> TokenManager {
        TokenManager::new(Client::new())
    }

    fn cookie_identity() -> AuthIdentity {
        AuthIdentity::CookieHeader("login=1".to_owned())
    }

    #[tokio::test]
    async fn second_call_within_ttl_is_served_from_cache() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api.php");
                then.status(200)
                    .header("set-cookie", "theme=dark; Path=/")
                    .json_body(token_body("cached-token"));
            })
            .await;

        let manager = manager();
        let origin = wiki_origin_of(&server);
        let identity = cookie_identity();

        let first = manager.get_token(&origin, &identity).await.unwrap();
        let second = manager.get_token(&origin, &identity).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.token, "cached-token");
        assert_eq!(first.cookie.as_deref(), Some("login=1; theme=dark"));
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn expired_record_triggers_a_second_fetch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api.php");
                then.status(200).json_body(token_body("fresh-token"));
            })
            .await;

        let manager = manager();
        let origin = wiki_origin_of(&server);
        let identity = cookie_identity();

        manager.get_token(&origin, &identity).await.unwrap();

        // age the record past the 20 minute window
        let key = identity.cache_key(&origin);
        manager
            .cache()
            .put(
                &key,
                TokenRecord {
                    token: "stale-token".to_owned(),
                    cookie: None,
                    fetched_at: Utc::now().timestamp() - TOKEN_TTL_SECS - 1,
                },
            )
            .await;

        let refreshed = manager.get_token(&origin, &identity).await.unwrap();
        assert_eq!(refreshed.token, "fresh-token");
        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn session_cookie_primes_a_second_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let router = Router::new().route(
            "/api.php",
            post(move |headers: HeaderMap| {
                let hits = hits_clone.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let cookie = headers
                        .get(header::COOKIE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_owned();
                    if cookie.contains("wiki_session") {
                        Json(token_body("second-token")).into_response()
                    } else {
                        (
                            AppendHeaders([(
                                header::SET_COOKIE,
                                "wiki_session=abc123; Path=/; HttpOnly",
                            )]),
                            Json(token_body("first-token")),
                        )
                            .into_response()
                    }
                }
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let manager = manager();
        let grant = manager
            .get_token(&wiki_origin(addr), &cookie_identity())
            .await
            .unwrap();

        assert_eq!(grant.token, "second-token");
        assert_eq!(grant.cookie.as_deref(), Some("login=1; wiki_session=abc123"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        handle.abort();
    }

    #[tokio::test]
    async fn non_session_cookies_do_not_prime() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let router = Router::new().route(
            "/api.php",
            post(move || {
                let hits = hits_clone.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (
                        AppendHeaders([(header::SET_COOKIE, "theme=dark; Path=/")]),
                        Json(token_body("only-token")),
                    )
                }
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let manager = manager();
        let grant = manager
            .get_token(&wiki_origin(addr), &cookie_identity())
            .await
            .unwrap();

        assert_eq!(grant.token, "only-token");
        assert_eq!(grant.cookie.as_deref(), Some("login=1; theme=dark"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn bearer_path_sends_no_cookies_and_ignores_set_cookie() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let router = Router::new().route(
            "/api.php",
            post(move |headers: HeaderMap| {
                let hits = hits_clone.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if headers.contains_key(header::COOKIE) {
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                    if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
                        != Some("Bearer test-jwt")
                    {
                        return StatusCode::UNAUTHORIZED.into_response();
                    }
                    (
                        AppendHeaders([(header::SET_COOKIE, "wiki_session=ignored")]),
                        Json(token_body("bearer-token")),
                    )
                        .into_response()
                }
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let manager = manager();
        let grant = manager
            .get_token(
                &wiki_origin(addr),
                &AuthIdentity::Bearer("Bearer test-jwt".to_owned()),
            )
            .await
            .unwrap();

        assert_eq!(grant.token, "bearer-token");
        assert_eq!(grant.cookie, None);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn empty_identity_fails_before_any_io() {
        let manager = manager();

        let err = manager
            .get_token("http://127.0.0.1:9/", &AuthIdentity::CookieHeader(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));

        let err = manager
            .get_token("http://127.0.0.1:9/", &AuthIdentity::Bearer(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
    }

    #[tokio::test]
    async fn transport_failure_is_not_cached() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let router = Router::new().route(
            "/api.php",
            post(move || {
                let hits = hits_clone.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let manager = manager();
        let origin = wiki_origin(addr);
        let identity = cookie_identity();

        let err = manager.get_token(&origin, &identity).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport { .. }));

        let key = identity.cache_key(&origin);
        assert!(manager.cache().get(&key).await.is_none());

        // nothing was cached, so the next call fetches again
        let err = manager.get_token(&origin, &identity).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport { .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        handle.abort();
    }

    #[tokio::test]
    async fn second_phase_transport_failure_aborts_the_fetch() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let router = Router::new().route(
            "/api.php",
            post(move |headers: HeaderMap| {
                let hits = hits_clone.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let cookie = headers
                        .get(header::COOKIE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_owned();
                    if cookie.contains("wiki_session") {
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    } else {
                        (
                            AppendHeaders([(header::SET_COOKIE, "wiki_session=abc123; Path=/")]),
                            Json(token_body("first-token")),
                        )
                            .into_response()
                    }
                }
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let manager = manager();
        let origin = wiki_origin(addr);
        let identity = cookie_identity();

        let err = manager.get_token(&origin, &identity).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport { .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        let key = identity.cache_key(&origin);
        assert!(manager.cache().get(&key).await.is_none());
        handle.abort();
    }

    #[tokio::test]
    async fn response_without_token_field_is_malformed() {
        let router = Router::new().route(
            "/api.php",
            post(|| async { Json(json!({ "query": {} })) }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let manager = manager();
        let err = manager
            .get_token(&wiki_origin(addr), &cookie_identity())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MalformedResponse { .. }));
        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_misses_share_one_fetch() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let router = Router::new().route(
            "/api.php",
            post(move || {
                let hits = hits_clone.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(150)).await;
                    Json(token_body("shared-token"))
                }
            }),
        );
        let (handle, addr) = spawn_axum(router).await;

        let manager = manager();
        let origin = wiki_origin(addr);
        let identity = cookie_identity();

        let (first, second) = tokio::join!(
            manager.get_token(&origin, &identity),
            manager.get_token(&origin, &identity)
        );

        let first = first.unwrap();
        let second = second.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.token, "shared-token");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        handle.abort();
    }

    fn wiki_origin_of(server: &MockServer) -> String {
        format!("{}/", server.base_url())
    }
}
