use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// In-memory response cache keyed by URL. Entries younger than `ttl` are
/// served without touching the network; older ones are revalidated.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Fresh(String),
    Stale {
        etag: Option<String>,
        last_modified: Option<String>,
    },
    Miss,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn lookup(&self, url: &str, now: Instant) -> Lookup {
        let entries = self.entries.lock().expect("http cache lock poisoned");
        match entries.get(url) {
            Some(entry) if now.saturating_duration_since(entry.fetched_at) < self.ttl => {
                Lookup::Fresh(entry.body.clone())
            }
            Some(entry) => Lookup::Stale {
                etag: entry.etag.clone(),
                last_modified: entry.last_modified.clone(),
            },
            None => Lookup::Miss,
        }
    }

    pub fn store(
        &self,
        url: &str,
        body: String,
        etag: Option<String>,
        last_modified: Option<String>,
        now: Instant,
    ) {
        let mut entries = self.entries.lock().expect("http cache lock poisoned");
        entries.insert(
            url.to_string(),
            CacheEntry {
                body,
                etag,
                last_modified,
                fetched_at: now,
            },
        );
    }

    /// Restart the validity window after a 304 and hand back the kept body.
    pub fn revalidated(&self, url: &str, now: Instant) -> Option<String> {
        let mut entries = self.entries.lock().expect("http cache lock poisoned");
        let entry = entries.get_mut(url)?;
        entry.fetched_at = now;
        Some(entry.body.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("http cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

/// GET `url` as text, going through `cache`. Non-success statuses are errors.
pub fn fetch_json_cached(client: &Client, cache: &ResponseCache, url: &str) -> Result<String> {
    let (etag, last_modified) = match cache.lookup(url, Instant::now()) {
        Lookup::Fresh(body) => return Ok(body),
        Lookup::Stale {
            etag,
            last_modified,
        } => (etag, last_modified),
        Lookup::Miss => (None, None),
    };

    let mut req = client.get(url);
    if let Some(etag) = etag.as_ref() {
        req = req.header(IF_NONE_MATCH, etag);
    }
    if let Some(last_modified) = last_modified.as_ref() {
        req = req.header(IF_MODIFIED_SINCE, last_modified);
    }

    let resp = req.send().context("request failed")?;
    let status = resp.status();
    let headers = resp.headers().clone();
    if status == StatusCode::NOT_MODIFIED {
        return cache
            .revalidated(url, Instant::now())
            .ok_or_else(|| anyhow::anyhow!("received 304 without cache body"));
    }

    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let snippet = body
            .trim()
            .replace(['\n', '\r'], " ")
            .chars()
            .take(220)
            .collect::<String>();
        return Err(anyhow::anyhow!("http {}: {}", status, snippet));
    }

    let etag = headers
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let last_modified = headers
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    cache.store(url, body.clone(), etag, last_modified, Instant::now());
    Ok(body)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Lookup, ResponseCache};

    #[test]
    fn entries_go_stale_after_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.store("u", "{}".to_string(), Some("\"v1\"".to_string()), None, t0);

        assert_eq!(
            cache.lookup("u", t0 + Duration::from_secs(59)),
            Lookup::Fresh("{}".to_string())
        );
        assert_eq!(
            cache.lookup("u", t0 + Duration::from_secs(60)),
            Lookup::Stale {
                etag: Some("\"v1\"".to_string()),
                last_modified: None,
            }
        );
        assert_eq!(cache.lookup("other", t0), Lookup::Miss);
    }

    #[test]
    fn revalidation_restarts_window() {
        let cache = ResponseCache::new(Duration::from_secs(30));
        let t0 = Instant::now();
        cache.store("u", "body".to_string(), None, None, t0);

        let later = t0 + Duration::from_secs(45);
        assert_eq!(cache.revalidated("u", later), Some("body".to_string()));
        assert_eq!(
            cache.lookup("u", later + Duration::from_secs(10)),
            Lookup::Fresh("body".to_string())
        );
        assert_eq!(cache.revalidated("missing", later), None);
    }

    #[test]
    fn zero_ttl_never_serves_fresh() {
        let cache = ResponseCache::new(Duration::ZERO);
        let t0 = Instant::now();
        cache.store("u", "body".to_string(), None, None, t0);
        assert!(matches!(cache.lookup("u", t0), Lookup::Stale { .. }));
    }
}
