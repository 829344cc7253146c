use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::api::ScreenerApi;
use crate::view::ViewPorts;

use super::with_deadline;

pub const NOT_CONFIGURED_WARNING: &str =
    "Warning: the backend analysis API key is not configured. Set it in the backend .env file.";
pub const UNREACHABLE_WARNING: &str =
    "Cannot reach the backend service. Make sure it is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthOutcome {
    Healthy,
    NotConfigured,
    Unreachable,
}

/// One-shot startup check of the backend. Problems become a transient warning and
/// never block the rest of the application.
pub struct HealthProbe<V: ViewPorts> {
    api: Arc<dyn ScreenerApi>,
    view: V,
    timeout: Duration,
}

impl<V: ViewPorts> HealthProbe<V> {
    pub fn new(api: Arc<dyn ScreenerApi>, view: V, timeout: Duration) -> Self {
        Self { api, view, timeout }
    }

    pub async fn run(&self) -> HealthOutcome {
        match with_deadline(self.timeout, self.api.health()).await {
            Ok(status) if status.api_configured => {
                info!(
                    "Backend healthy (status: {})",
                    status.status.as_deref().unwrap_or("unknown")
                );
                HealthOutcome::Healthy
            }
            Ok(_) => {
                warn!("Backend reachable but its analysis API key is not configured");
                self.view.flash_warning(NOT_CONFIGURED_WARNING.to_string());
                HealthOutcome::NotConfigured
            }
            Err(err) => {
                warn!("Health check failed: {err}");
                self.view.flash_warning(UNREACHABLE_WARNING.to_string());
                HealthOutcome::Unreachable
            }
        }
    }
}
