use crate::error::{AppError, Result};

use super::{ApiConfig, Config, UiConfig};

/// Validate the whole configuration, reporting every problem at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_api(&config.api, &mut issues);
    validate_ui(&config.ui, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(issues))
    }
}

fn validate_api(api: &ApiConfig, issues: &mut Vec<String>) {
    let url = api.base_url.trim();
    if url.is_empty() {
        issues.push("api.base_url must not be empty".to_string());
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        issues.push(format!(
            "api.base_url `{url}` must start with http:// or https://"
        ));
    }

    if api.request_timeout_secs == 0 {
        issues.push("api.request_timeout_secs must be greater than zero".to_string());
    }
    if api.connect_timeout_secs == 0 {
        issues.push("api.connect_timeout_secs must be greater than zero".to_string());
    }
}

fn validate_ui(ui: &UiConfig, issues: &mut Vec<String>) {
    if ui.warning_secs == 0 {
        issues.push("ui.warning_secs must be greater than zero".to_string());
    }
    if ui.tick_millis == 0 {
        issues.push("ui.tick_millis must be greater than zero".to_string());
    }
}
