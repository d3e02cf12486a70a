//! Nyaa REST API index implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;

use super::{IndexError, SearchParams, SortOrder, TorrentIndex, UserParams};

/// Production index backed by the nyaa REST API.
pub struct NyaaApi {
    client: Client,
    base_url: String,
}

impl NyaaApi {
    /// Create a new API client from configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    /// Query parameters for a search request.
    fn search_query(params: &SearchParams) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("q", params.query.clone()),
            ("category", params.category.clone()),
            ("p", params.page.to_string()),
        ];
        if let Some(subcategory) = &params.subcategory {
            query.push(("subcategory", subcategory.clone()));
        }
        if let Some(sort) = params.sort {
            query.push(("sort", sort.as_str().to_string()));
            query.push(("order", params.order.as_str().to_string()));
        } else if params.order != SortOrder::Desc {
            query.push(("order", params.order.as_str().to_string()));
        }
        query
    }

    /// Query parameters for a per-user request.
    fn user_query(params: &UserParams) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(q) = &params.query {
            query.push(("q", q.clone()));
        }
        if let Some(category) = &params.category {
            query.push(("category", category.clone()));
        }
        if let Some(subcategory) = &params.subcategory {
            query.push(("subcategory", subcategory.clone()));
        }
        query
    }

    /// Issue a GET request and parse the JSON body.
    async fn get_json(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value, IndexError> {
        debug!(url = url, params = query.len(), "Index request");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IndexError::Timeout
                } else if e.is_connect() {
                    IndexError::ConnectionFailed(e.to_string())
                } else {
                    IndexError::ApiError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IndexError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| IndexError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl TorrentIndex for NyaaApi {
    fn name(&self) -> &str {
        "nyaa"
    }

    async fn search(&self, params: &SearchParams) -> Result<Value, IndexError> {
        let url = self.endpoint(&["nyaa"]);
        let raw = self.get_json(&url, &Self::search_query(params)).await?;
        debug!(query = %params.query, "Search complete");
        Ok(raw)
    }

    async fn by_user(&self, username: &str, params: &UserParams) -> Result<Value, IndexError> {
        let url = self.endpoint(&["nyaa", "user", username]);
        let raw = self.get_json(&url, &Self::user_query(params)).await?;
        debug!(username = username, "User listing complete");
        Ok(raw)
    }

    async fn by_id(&self, id: &str) -> Result<Value, IndexError> {
        let url = self.endpoint(&["nyaa", "id", id]);
        self.get_json(&url, &[]).await
    }
}
