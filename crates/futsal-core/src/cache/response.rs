use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self::at(data, Utc::now())
    }

    pub fn at(data: T, cached_at: DateTime<Utc>) -> Self {
        Self { data, cached_at }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew (negative ages)
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            let remaining_mins = minutes % 60;
            if remaining_mins >= 30 {
                // Round up: 1h 30m+ becomes 2h
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            let remaining_hours = (minutes % 1440) / 60;
            if remaining_hours >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    /// An entry is fresh while `now - cached_at < ttl`.
    pub fn is_fresh_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.cached_at < ttl
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        !self.is_fresh_at(ttl, Utc::now())
    }
}

/// In-memory memo of successful fetches, keyed by request fingerprint.
///
/// Entries have no capacity bound and are only replaced once their TTL has
/// passed; they live for the life of the process. Failed fetches are never
/// stored.
pub struct ResponseCache<V> {
    entries: Mutex<HashMap<String, CachedData<V>>>,
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> ResponseCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key` if it is younger than `ttl`,
    /// otherwise run `fetch`, store a successful result and return it.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, ttl: Duration, fetch: F) -> Result<CachedData<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.get_or_fetch_at(key, ttl, Utc::now(), fetch).await
    }

    /// `get_or_fetch` evaluated at an explicit point in time
    pub async fn get_or_fetch_at<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        now: DateTime<Utc>,
        fetch: F,
    ) -> Result<CachedData<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.lookup_at(key, ttl, now).await {
            debug!(key = key, "Cache hit");
            return Ok(hit);
        }

        debug!(key = key, "Cache miss, fetching");
        // The lock is released while fetching
        let value = fetch().await?;
        let entry = CachedData::at(value, now);
        self.entries
            .lock()
            .await
            .insert(key.to_string(), entry.clone());
        Ok(entry)
    }

    /// Fresh entry for `key`, if any
    pub async fn lookup_at(&self, key: &str, ttl: Duration, now: DateTime<Utc>) -> Option<CachedData<V>> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|cached| cached.is_fresh_at(ttl, now))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
