/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Place identifier resolution.
//!
//! Map authors can paste an id into a placemark description
//! (`PLACEID:ChIJ…`, `Place ID: ChIJ…`, …). When none is present, a nearby
//! search by name around the point's coordinates supplies one. The search
//! runs at most once per point and never retries; any failure leaves the
//! point without an id.

use crate::config::PlacesConfig;
use async_trait::async_trait;
use kmlroute_core::{LatLng, PlaceId};
use regex::Regex;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const USER_AGENT: &str = concat!("kmlroute/", env!("CARGO_PKG_VERSION"));

/// Finds a place id embedded in free text.
pub trait PlaceIdExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Option<PlaceId>;
}

/// Tolerant `place id` token matcher.
///
/// `place` at a word start, an optional `_`/`-`/space, `id` at a word end,
/// then optional punctuation padded by whitespace. The id itself starts with
/// a letter or digit. Case-insensitive; first match wins.
pub struct RegexPlaceIdExtractor {
    pattern: Regex,
}

impl Default for RegexPlaceIdExtractor {
    fn default() -> Self {
        Self {
            pattern: Regex::new(
                r"(?i)\bplace[_\-\s]?id\b\s*[[:punct:]]?\s*(?P<id>[A-Za-z0-9][A-Za-z0-9_\-]*)",
            )
            .expect("place id pattern is valid"),
        }
    }
}

impl PlaceIdExtractor for RegexPlaceIdExtractor {
    fn extract(&self, text: &str) -> Option<PlaceId> {
        self.pattern
            .captures(text)
            .and_then(|cap| cap.name("id"))
            .and_then(|m| PlaceId::new(m.as_str()))
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}: {1}")]
    Http(u16, String),

    #[error("service status {0}")]
    Status(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no results")]
    NoResults,
}

/// A proximity search around one point.
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery<'a> {
    pub keyword: &'a str,
    pub location: LatLng,
}

/// External nearby-search service. Returns the top result's id.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn nearby(&self, query: &NearbyQuery<'_>) -> Result<PlaceId, LookupError>;
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: Option<String>,
}

/// Spaces requests at least `min_interval` apart.
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!(?wait_time, "place search rate limiting");
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// HTTP client for a Places-style nearby search endpoint.
pub struct PlacesClient {
    http_client: reqwest::Client,
    rate_limiter: RateLimiter,
    endpoint: String,
    api_key: String,
    radius: u32,
    category: String,
}

impl PlacesClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: RateLimiter::new(Duration::from_millis(config.min_interval_ms)),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            radius: config.radius,
            category: config.category.clone(),
        })
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn nearby(&self, query: &NearbyQuery<'_>) -> Result<PlaceId, LookupError> {
        self.rate_limiter.wait().await;

        let location = query.location.to_string();
        let radius = self.radius.to_string();
        let params = [
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", self.category.as_str()),
            ("keyword", query.keyword),
            ("key", self.api_key.as_str()),
        ];

        tracing::debug!(keyword = query.keyword, %location, "nearby search");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Http(status.as_u16(), body));
        }

        let body: NearbyResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        first_place_id(body)
    }
}

fn first_place_id(body: NearbyResponse) -> Result<PlaceId, LookupError> {
    match body.status.as_str() {
        "OK" => body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.place_id)
            .and_then(PlaceId::new)
            .ok_or(LookupError::NoResults),
        "ZERO_RESULTS" => Err(LookupError::NoResults),
        other => Err(LookupError::Status(match body.error_message {
            Some(message) => format!("{other}: {message}"),
            None => other.to_string(),
        })),
    }
}
