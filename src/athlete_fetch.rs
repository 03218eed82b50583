use std::time::Duration;

use anyhow::{Context, Result};
use url::form_urlencoded;
use uuid::Uuid;

use crate::athlete::{AthleteDetail, AthleteListPage, parse_athlete_detail_json, parse_athletes_json};
use crate::filters::FilterState;
use crate::http_cache::{ResponseCache, fetch_json_cached};
use crate::http_client::http_client;
use crate::query::{self, KEY_LIMIT};

pub const DEFAULT_API_URL: &str = "https://futscout-api.onrender.com/api";
const ATHLETES_PATH: &str = "/public/athletes";
const SEARCH_KEY: &str = "search";

/// Where response bodies come from. The HTTP implementation is `HttpSource`.
pub trait JsonSource: Send + Sync {
    fn get_json(&self, url: &str) -> Result<String>;
}

/// Blocking reqwest transport with a per-URL validity window.
#[derive(Debug, Default)]
pub struct HttpSource {
    cache: ResponseCache,
}

impl HttpSource {
    pub fn new(cache_ttl: Duration) -> Self {
        Self {
            cache: ResponseCache::new(cache_ttl),
        }
    }
}

impl JsonSource for HttpSource {
    fn get_json(&self, url: &str) -> Result<String> {
        let client = http_client()?;
        fetch_json_cached(client, &self.cache, url)
    }
}

#[derive(Debug, Clone)]
pub enum DetailOutcome {
    Found(Box<AthleteDetail>),
    /// Transport failures, bad statuses and unknown nicknames all land here;
    /// `reason` is for the log only.
    NotFound { reason: String },
}

#[derive(Debug, Clone)]
pub struct AthleteApi<S> {
    base_url: String,
    source: S,
    default_limit: Option<u32>,
}

impl<S: JsonSource> AthleteApi<S> {
    pub fn new(base_url: &str, source: S) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            source,
            default_limit: None,
        }
    }

    /// Page size sent when the filters carry none.
    pub fn with_default_limit(mut self, limit: Option<u32>) -> Self {
        self.default_limit = limit.filter(|l| *l > 0);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn listing_url(&self, filters: &FilterState) -> String {
        let mut query = query::serialize(filters);
        if filters.limit.is_none()
            && let Some(limit) = self.default_limit
        {
            let mut extra = form_urlencoded::Serializer::new(query);
            extra.append_pair(KEY_LIMIT, &limit.to_string());
            query = extra.finish();
        }
        if query.is_empty() {
            format!("{}{ATHLETES_PATH}", self.base_url)
        } else {
            format!("{}{ATHLETES_PATH}?{query}", self.base_url)
        }
    }

    pub fn search_url(&self, nickname: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(SEARCH_KEY, nickname)
            .finish();
        format!("{}{ATHLETES_PATH}?{query}", self.base_url)
    }

    pub fn detail_url(&self, id: &str) -> String {
        let segment = form_urlencoded::byte_serialize(id.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        format!("{}{ATHLETES_PATH}/{segment}", self.base_url)
    }

    pub fn fetch_athletes(&self, filters: &FilterState) -> Result<AthleteListPage> {
        let url = self.listing_url(filters);
        let body = self
            .source
            .get_json(&url)
            .context("athletes request failed")?;
        parse_athletes_json(&body)
    }

    /// UUIDs are fetched directly; anything else is treated as a nickname,
    /// searched, and matched case-insensitively before fetching by id.
    pub fn fetch_athlete_by_identifier(&self, identifier: &str) -> DetailOutcome {
        match self.resolve_athlete(identifier) {
            Ok(Some(athlete)) => DetailOutcome::Found(Box::new(athlete)),
            Ok(None) => DetailOutcome::NotFound {
                reason: format!("no athlete matches '{identifier}'"),
            },
            Err(err) => DetailOutcome::NotFound {
                reason: format!("{err:#}"),
            },
        }
    }

    fn resolve_athlete(&self, identifier: &str) -> Result<Option<AthleteDetail>> {
        if identifier.trim().is_empty() {
            return Ok(None);
        }
        if is_uuid(identifier) {
            return self.fetch_detail(identifier).map(Some);
        }

        let body = self
            .source
            .get_json(&self.search_url(identifier))
            .context("athlete search failed")?;
        let candidates = parse_athletes_json(&body)?;
        let wanted = identifier.to_lowercase();
        let Some(found) = candidates.athletes.into_iter().find(|athlete| {
            athlete
                .nickname
                .as_deref()
                .is_some_and(|nickname| nickname.to_lowercase() == wanted)
        }) else {
            return Ok(None);
        };

        self.fetch_detail(&found.id).map(Some)
    }

    fn fetch_detail(&self, id: &str) -> Result<AthleteDetail> {
        let body = self
            .source
            .get_json(&self.detail_url(id))
            .with_context(|| format!("athlete {id} request failed"))?;
        parse_athlete_detail_json(&body)
    }
}

/// Canonical hyphenated 8-4-4-4-12 hex form only.
pub fn is_uuid(identifier: &str) -> bool {
    identifier.len() == 36 && Uuid::parse_str(identifier).is_ok()
}

#[cfg(test)]
mod tests {
    use super::is_uuid;

    #[test]
    fn uuid_detection_requires_canonical_form() {
        assert!(is_uuid("3f2b8c1e-9d4a-4b7e-8c2f-1a2b3c4d5e6f"));
        assert!(is_uuid("3F2B8C1E-9D4A-4B7E-8C2F-1A2B3C4D5E6F"));
        assert!(!is_uuid("3f2b8c1e9d4a4b7e8c2f1a2b3c4d5e6f"));
        assert!(!is_uuid("{3f2b8c1e-9d4a-4b7e-8c2f-1a2b3c4d5e6f}"));
        assert!(!is_uuid("3f2b8c1e-9d4a-4b7e-8c2f-1a2b3c4d5e6g"));
        assert!(!is_uuid("rafa10"));
    }
}
