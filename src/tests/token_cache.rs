#[cfg(test)]
mod test {

    use chrono::Utc;

    use crate::auth::AuthIdentity;
    use crate::token::{TokenCache, TokenRecord};
    use crate::utils::constants::TOKEN_TTL_SECS;

    const ORIGIN: &str = "https://somewhere.pub.wiki/";

    #[test]
    fn cache_key_is_deterministic_and_bounded() {
        let identity = AuthIdentity::Bearer("Bearer abc".to_owned());
        let first = identity.cache_key(ORIGIN);
        let second = identity.cache_key(ORIGIN);
        assert_eq!(first, second);
        // sha-256 hex digest
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn cache_key_separates_variants_with_equal_payloads() {
        let bearer = AuthIdentity::Bearer("X".to_owned());
        let cookie = AuthIdentity::CookieHeader("X".to_owned());
        assert_ne!(bearer.cache_key(ORIGIN), cookie.cache_key(ORIGIN));
    }

    #[test]
    fn cache_key_depends_on_origin() {
        let identity = AuthIdentity::CookieHeader("a=1".to_owned());
        assert_ne!(
            identity.cache_key("https://one.example/"),
            identity.cache_key("https://two.example/")
        );
    }

    #[tokio::test]
    async fn fresh_record_is_returned() {
        let cache = TokenCache::new();
        let record = TokenRecord::new("tok".to_owned(), Some("a=1".to_owned()));
        cache.put("key", record.clone()).await;

        let got = cache.get("key").await;
        assert_eq!(got, Some(record));
    }

    #[tokio::test]
    async fn stale_record_is_filtered_on_read() {
        let cache = TokenCache::new();
        cache
            .put(
                "key",
                TokenRecord {
                    token: "tok".to_owned(),
                    cookie: None,
                    fetched_at: Utc::now().timestamp() - TOKEN_TTL_SECS - 1,
                },
            )
            .await;

        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn put_replaces_the_record_wholesale() {
        let cache = TokenCache::new();
        cache
            .put("key", TokenRecord::new("old".to_owned(), Some("a=1".to_owned())))
            .await;
        cache.put("key", TokenRecord::new("new".to_owned(), None)).await;

        let got = cache.get("key").await.expect("record should be fresh");
        assert_eq!(got.token, "new");
        assert_eq!(got.cookie, None);
    }
}
