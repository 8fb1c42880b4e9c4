use async_trait::async_trait;
use compute::error::FetchError;
use compute::pipeline::ChartApi;
use gloo_net::http::Request;
use serde_json::Value;

use crate::settings::{self, AppSettings};

/// Browser `fetch` transport for the chart endpoints.
#[derive(Debug, Clone)]
pub struct HttpChartApi {
    settings: AppSettings,
}

impl HttpChartApi {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    pub fn from_settings() -> Self {
        Self::new(settings::get_settings())
    }
}

#[async_trait(?Send)]
impl ChartApi for HttpChartApi {
    async fn post_json(&self, endpoint: &str) -> Result<Value, FetchError> {
        let url = self.settings.api_url(endpoint);
        log::debug!("POST request to: {}", url);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                log::error!("POST {} - Request failed: {}", endpoint, e);
                FetchError::Transport(e.to_string())
            })?;

        if !response.ok() {
            log::error!("POST {} - HTTP error: {}", endpoint, response.status());
            return Err(FetchError::Status(response.status()));
        }

        log::trace!("POST {} - Response received, parsing JSON", endpoint);
        let body: Value = response.json().await.map_err(|e| {
            log::error!("POST {} - Failed to parse response: {}", endpoint, e);
            FetchError::Decode(e.to_string())
        })?;

        log::info!("POST {} - Success", endpoint);
        Ok(body)
    }
}
