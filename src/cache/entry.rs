//! Cache Entry Module
//!
//! Payload with optional expiry, held by the in-memory test store.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized payload
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    /// Creates a new entry that expires after `ttl`, or never if `None`.
    pub fn new(value: String, ttl: Option<Duration>) -> Self {
        let expires_at =
            ttl.map(|ttl| current_timestamp_ms().saturating_add(ttl.as_millis() as u64));
        Self { value, expires_at }
    }

    /// An entry is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_without_ttl_never_expires() {
        let entry = CacheEntry::new("{}".to_string(), None);

        assert_eq!(entry.value, "{}");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("{}".to_string(), Some(Duration::from_millis(50)));
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry {
            value: "{}".to_string(),
            expires_at: Some(current_timestamp_ms()),
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
