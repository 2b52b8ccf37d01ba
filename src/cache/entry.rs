//! Cache Entry Module
//!
//! Defines a stored response together with the instant it stops being valid.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::cache::CacheKey;

// == Payload ==
/// Response body captured at store time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Json(serde_json::Value),
}

impl Payload {
    /// Returns the body as text, if it was requested as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Json(_) => None,
        }
    }

    /// Returns the body as JSON, if it was requested as JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }
}

// == Response Handle ==
/// Transport-level details of a response, kept for the caller to inspect.
///
/// The cache only carries this around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHandle {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers in arrival order
    pub headers: Vec<(String, String)>,
}

impl ResponseHandle {
    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// == Response ==
/// The `(payload, status, raw_handle)` triple a request resolves with.
#[derive(Debug, Clone)]
pub struct Response {
    pub payload: Payload,
    pub status: u16,
    pub raw_handle: Arc<ResponseHandle>,
}

// == Cache Entry ==
/// Represents a single stored response with its expiry.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    /// Key the entry was stored under
    pub key: CacheKey,
    /// Instant the entry was stored
    pub stored_at: DateTime<Utc>,
    /// Instant after which the entry is stale
    pub expires_at: DateTime<Utc>,
    /// Stored body
    pub payload: Payload,
    /// Stored transport status
    pub status: u16,
    /// Stored transport handle
    #[serde(skip)]
    pub raw_handle: Arc<ResponseHandle>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored at `now` that expires `lifetime` later.
    ///
    /// An expiry past the representable range is clamped to the maximum instant.
    pub fn new(
        key: CacheKey,
        now: DateTime<Utc>,
        lifetime: Duration,
        payload: Payload,
        status: u16,
        raw_handle: Arc<ResponseHandle>,
    ) -> Self {
        let expires_at = now
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            key,
            stored_at: now,
            expires_at,
            payload,
            status,
            raw_handle,
        }
    }

    // == Is Valid ==
    /// Checks whether the entry may still be served at `now`.
    ///
    /// Boundary condition: the entry is stale once `now` reaches `expires_at`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    // == Time To Live ==
    /// Remaining validity at `now`, zero once stale.
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// Returns the stored triple.
    pub fn response(&self) -> Response {
        Response {
            payload: self.payload.clone(),
            status: self.status,
            raw_handle: Arc::clone(&self.raw_handle),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(now: DateTime<Utc>, lifetime: Duration) -> CacheEntry {
        CacheEntry::new(
            CacheKey::address("/api/2/user/"),
            now,
            lifetime,
            Payload::Text("ok".to_string()),
            200,
            Arc::new(ResponseHandle::default()),
        )
    }

    #[test]
    fn test_entry_expires_at_is_fixed_at_creation() {
        let now = Utc::now();
        let entry = entry_at(now, Duration::minutes(5));

        assert_eq!(entry.stored_at, now);
        assert_eq!(entry.expires_at, now + Duration::minutes(5));
    }

    #[test]
    fn test_entry_validity() {
        let now = Utc::now();
        let entry = entry_at(now, Duration::seconds(10));

        assert!(entry.is_valid_at(now));
        assert!(entry.is_valid_at(now + Duration::seconds(9)));
        assert!(!entry.is_valid_at(now + Duration::seconds(11)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let entry = entry_at(now, Duration::seconds(10));

        assert!(
            !entry.is_valid_at(now + Duration::seconds(10)),
            "Entry should be stale at boundary"
        );
    }

    #[test]
    fn test_zero_lifetime_is_immediately_stale() {
        let now = Utc::now();
        let entry = entry_at(now, Duration::zero());
        assert!(!entry.is_valid_at(now));
    }

    #[test]
    fn test_ttl_remaining() {
        let now = Utc::now();
        let entry = entry_at(now, Duration::seconds(10));

        assert_eq!(entry.ttl_remaining(now), Duration::seconds(10));
        assert_eq!(entry.ttl_remaining(now + Duration::seconds(4)), Duration::seconds(6));
        assert_eq!(entry.ttl_remaining(now + Duration::hours(1)), Duration::zero());
    }

    #[test]
    fn test_overflowing_lifetime_clamps() {
        let entry = entry_at(Utc::now(), Duration::MAX);
        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_response_shares_handle() {
        let entry = entry_at(Utc::now(), Duration::minutes(1));
        let response = entry.response();

        assert_eq!(response.status, 200);
        assert_eq!(response.payload.as_text(), Some("ok"));
        assert!(Arc::ptr_eq(&response.raw_handle, &entry.raw_handle));
    }

    #[test]
    fn test_handle_header_lookup_ignores_case() {
        let handle = ResponseHandle {
            url: "http://localhost/".to_string(),
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        };
        assert_eq!(handle.header("content-type"), Some("application/json"));
        assert_eq!(handle.header("etag"), None);
    }

    #[test]
    fn test_entry_serialize_skips_handle() {
        let entry = entry_at(Utc::now(), Duration::minutes(1));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["key"]["address"], "/api/2/user/");
        assert_eq!(json["payload"], "ok");
        assert!(json.get("raw_handle").is_none());
    }
}
