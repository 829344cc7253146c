use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{AppError, Context, Result};

use super::decode::error_detail;
use super::models::{ChatResponse, ScreenResponse, StockListResponse};
use super::{
    ChatAnswer, ChatRequest, HealthStatus, ScreenRequest, ScreenResults, ScreenerApi, Stock,
    CHAT_PATH, HEALTH_PATH, SCREEN_PATH, STOCKS_PATH,
};

/// JSON-over-HTTP client for the screening backend.
#[derive(Debug, Clone)]
pub struct HttpScreenerApi {
    client: Client,
    base_url: String,
}

impl HttpScreenerApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("screener-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScreenerApi for HttpScreenerApi {
    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(HEALTH_PATH);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        read_json(HEALTH_PATH, response).await
    }

    async fn screen(&self, request: &ScreenRequest) -> Result<ScreenResults> {
        let url = self.endpoint(SCREEN_PATH);
        debug!(
            "POST {url} (max_results={:?}, max_stocks_to_analyze={:?})",
            request.max_results, request.max_stocks_to_analyze
        );
        let response = self.client.post(&url).json(request).send().await?;
        read_json::<ScreenResponse>(SCREEN_PATH, response)
            .await?
            .into_result()
    }

    async fn stocks(&self, limit: usize) -> Result<Vec<Stock>> {
        let url = self.endpoint(STOCKS_PATH);
        debug!("GET {url}?limit={limit}");
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        read_json::<StockListResponse>(STOCKS_PATH, response)
            .await?
            .into_result()
    }

    async fn ask(&self, request: &ChatRequest) -> Result<ChatAnswer> {
        let url = self.endpoint(CHAT_PATH);
        debug!("POST {url} (stock_code={})", request.stock_code);
        let response = self.client.post(&url).json(request).send().await?;
        read_json::<ChatResponse>(CHAT_PATH, response)
            .await?
            .into_result(request)
    }
}

async fn read_json<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = error_detail(&body).unwrap_or_else(|| status.to_string());
        return Err(AppError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|source| AppError::Decode { endpoint, source })
}
