//! Single-slot idempotent-retry cache.

use crate::http::HttpError;
use crate::observability::metrics;

/// The most recent mutating request and its response.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub verb: String,
    pub url: String,
    pub body: String,
    /// Always `Some` for entries written by [`RequestCache::store`]; a `None`
    /// observed on a key match is an internal consistency violation.
    pub response: Option<String>,
}

/// Memo holding at most one request/response pair per context.
///
/// This is a narrowly-scoped guard for the immediate-retry pattern (the same
/// mutating call submitted twice in quick succession within one unit of
/// work). It is not an HTTP cache: no cache-control semantics, no TTL, no
/// keyed capacity beyond the single slot.
#[derive(Debug, Default)]
pub struct RequestCache {
    slot: Option<CacheEntry>,
}

impl RequestCache {
    /// Look up `(verb, url, body)` with exact string equality on every field;
    /// absent fields compare as the empty string, never as wildcards.
    ///
    /// A key match with no stored response is reported as
    /// [`HttpError::CacheInconsistency`] rather than treated as a miss.
    pub fn lookup(&self, verb: &str, url: &str, body: &str) -> Result<Option<String>, HttpError> {
        match &self.slot {
            Some(entry) if entry.verb == verb && entry.url == url && entry.body == body => {
                match &entry.response {
                    Some(response) => Ok(Some(response.clone())),
                    None => Err(HttpError::CacheInconsistency),
                }
            }
            _ => Ok(None),
        }
    }

    /// Overwrite the slot with the newest tuple. Most recent wins; there is
    /// no other eviction.
    pub fn store(&mut self, verb: &str, url: &str, body: &str, response: &str) {
        metrics::record_cache_store(verb);
        self.slot = Some(CacheEntry {
            verb: verb.to_string(),
            url: url.to_string(),
            body: body.to_string(),
            response: Some(response.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_misses() {
        let cache = RequestCache::default();
        assert_eq!(
            cache.lookup("POST", "https://x.example/a", "{}").unwrap(),
            None
        );
    }

    #[test]
    fn test_store_then_hit() {
        let mut cache = RequestCache::default();
        cache.store("POST", "https://x.example/a", "{}", "ok");
        assert_eq!(
            cache.lookup("POST", "https://x.example/a", "{}").unwrap(),
            Some("ok".to_string())
        );
    }

    #[test]
    fn test_any_field_mismatch_is_a_miss() {
        let mut cache = RequestCache::default();
        cache.store("POST", "https://x.example/a", "{}", "ok");

        assert_eq!(
            cache.lookup("PUT", "https://x.example/a", "{}").unwrap(),
            None
        );
        assert_eq!(
            cache.lookup("POST", "https://x.example/b", "{}").unwrap(),
            None
        );
        assert_eq!(
            cache.lookup("POST", "https://x.example/a", "{ }").unwrap(),
            None
        );
    }

    #[test]
    fn test_store_overwrites_single_slot() {
        let mut cache = RequestCache::default();
        cache.store("POST", "https://x.example/a", "1", "first");
        cache.store("POST", "https://x.example/a", "2", "second");

        assert_eq!(cache.lookup("POST", "https://x.example/a", "1").unwrap(), None);
        assert_eq!(
            cache.lookup("POST", "https://x.example/a", "2").unwrap(),
            Some("second".to_string())
        );
    }

    #[test]
    fn test_empty_body_matches_empty_body() {
        let mut cache = RequestCache::default();
        cache.store("DELETE", "https://x.example/a", "", "gone");
        assert_eq!(
            cache.lookup("DELETE", "https://x.example/a", "").unwrap(),
            Some("gone".to_string())
        );
    }

    #[test]
    fn test_matched_key_without_response_is_fatal() {
        let cache = RequestCache {
            slot: Some(CacheEntry {
                verb: "POST".to_string(),
                url: "https://x.example/a".to_string(),
                body: String::new(),
                response: None,
            }),
        };
        let err = cache.lookup("POST", "https://x.example/a", "").unwrap_err();
        assert!(matches!(err, HttpError::CacheInconsistency));
    }
}
