use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

use crate::client::{ApiError, GalaxyApi};
use crate::models::*;
use crate::{v_debug, API_LOG_FILE};

#[derive(Clone)]
pub struct SpaceTradersClient {
    client: reqwest::Client,
    base_url: String,
    request_delay: Duration,
    api_logging: bool,
}

impl SpaceTradersClient {
    pub fn new(base_url: &str, token: &str, request_delay: Duration) -> Result<Self, Box<dyn std::error::Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| format!("Invalid API token: {}", e))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(SpaceTradersClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_delay,
            api_logging: false,
        })
    }

    pub fn set_api_logging(&mut self, logging: bool) {
        self.api_logging = logging;
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    fn log_api_call(&self, method: &str, url: &str, response_status: u16, response_body: &str) {
        if !self.api_logging {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!(
            "\n=== API CALL [{timestamp}] ===\n\
             Method: {method}\n\
             URL: {url}\n\
             Response Status: {response_status}\n\
             Response Body: {response_body}\n\
             ========================================\n"
        );

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(API_LOG_FILE)
        {
            let _ = file.write_all(log_entry.as_bytes());
        }
    }

    /// Authenticated GET decoded into the shared envelope. Every successful
    /// call is followed by the fixed request delay before returning.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, Box<dyn std::error::Error>> {
        let url = format!("{}{}", self.base_url, path);
        v_debug!("🌐 GET {} {:?}", path, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        self.log_api_call("GET", &url, status.as_u16(), &body);

        if !status.is_success() {
            return Err(Box::new(ApiError {
                method: "GET".to_string(),
                url,
                status: status.as_u16(),
                body,
            }));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|e| format!("Failed to decode response from {}: {}", url, e))?;

        tokio::time::sleep(self.request_delay).await;
        Ok(envelope)
    }
}

#[async_trait]
impl GalaxyApi for SpaceTradersClient {
    async fn list_systems(&self, page: u32, limit: u32) -> Result<SystemsPage, Box<dyn std::error::Error>> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        self.get("/systems", &query).await
    }

    async fn list_system_waypoints(
        &self,
        system_symbol: &str,
        page: u32,
        limit: u32,
    ) -> Result<WaypointsPage, Box<dyn std::error::Error>> {
        let path = format!("/systems/{}/waypoints", system_symbol);
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        self.get(&path, &query).await
    }

    async fn get_market(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Market, Box<dyn std::error::Error>> {
        let path = format!("/systems/{}/waypoints/{}/market", system_symbol, waypoint_symbol);
        let response: MarketResponse = self.get(&path, &[]).await?;
        Ok(response.data)
    }
}
