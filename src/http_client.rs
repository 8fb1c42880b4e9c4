use async_trait::async_trait;
use compute::error::FetchError;
use compute::pipeline::ChartApi;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, trace};

/// `reqwest` transport for the chart endpoints.
#[derive(Debug, Clone)]
pub struct ReqwestChartApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestChartApi {
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("energia-dash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait(?Send)]
impl ChartApi for ReqwestChartApi {
    async fn post_json(&self, endpoint: &str) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("POST {} - Request failed: {}", endpoint, e);
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("POST {} - HTTP error: {}", endpoint, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        trace!("POST {} - Response received, parsing JSON", endpoint);
        response.json::<Value>().await.map_err(|e| {
            error!("POST {} - Failed to parse response: {}", endpoint, e);
            FetchError::Decode(e.to_string())
        })
    }
}
