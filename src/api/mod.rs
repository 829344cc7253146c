use async_trait::async_trait;

use crate::error::Result;

pub mod client;
pub mod decode;
pub mod models;

pub use client::HttpScreenerApi;
pub use models::{
    ChatAnswer, ChatRequest, HealthStatus, ScreenRequest, ScreenResults, Stock,
};

/// Page size requested for the reference stock listing.
pub const STOCK_LIST_LIMIT: usize = 50;

pub const HEALTH_PATH: &str = "/api/health";
pub const SCREEN_PATH: &str = "/api/screen";
pub const STOCKS_PATH: &str = "/api/stocks";
pub const CHAT_PATH: &str = "/api/chat";

/// Remote screening service. Replies with `success: false` surface as
/// [`AppError::Rejected`](crate::AppError::Rejected), so callers only ever see
/// `Ok` payloads or errors.
#[async_trait]
pub trait ScreenerApi: Send + Sync {
    async fn health(&self) -> Result<HealthStatus>;

    async fn screen(&self, request: &ScreenRequest) -> Result<ScreenResults>;

    async fn stocks(&self, limit: usize) -> Result<Vec<Stock>>;

    async fn ask(&self, request: &ChatRequest) -> Result<ChatAnswer>;
}
