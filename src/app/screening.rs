use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::api::decode::parse_leading_int;
use crate::api::{ScreenRequest, ScreenerApi};
use crate::config::ScreeningDefaults;
use crate::error::{AppError, Result};
use crate::view::{LoadingIndicator, ViewPorts};

use super::render::render_results;
use super::{with_deadline, InFlight};

pub const CRITERIA_REQUIRED: &str = "Please enter screening criteria.";
pub const SCREEN_FAILED: &str = "Screening failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    ResultsShown,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected,
    /// A screening request is already in flight.
    Busy,
    Shown { matches: usize },
    Failed,
}

/// Raw screening form input as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenForm {
    pub criteria: String,
    pub max_results: String,
    pub max_stocks_to_analyze: String,
}

impl ScreenForm {
    pub fn new(
        criteria: impl Into<String>,
        max_results: impl Into<String>,
        max_stocks_to_analyze: impl Into<String>,
    ) -> Self {
        Self {
            criteria: criteria.into(),
            max_results: max_results.into(),
            max_stocks_to_analyze: max_stocks_to_analyze.into(),
        }
    }

    pub fn with_defaults(criteria: impl Into<String>, defaults: &ScreeningDefaults) -> Self {
        Self::new(
            criteria,
            defaults.max_results.to_string(),
            defaults.max_stocks_to_analyze.to_string(),
        )
    }

    /// Replace the numeric fields the caller supplied; the others keep their value.
    pub fn override_limits(
        mut self,
        max_results: Option<String>,
        max_stocks_to_analyze: Option<String>,
    ) -> Self {
        if let Some(value) = max_results {
            self.max_results = value;
        }
        if let Some(value) = max_stocks_to_analyze {
            self.max_stocks_to_analyze = value;
        }
        self
    }

    /// Trim the criteria and parse the numeric fields. Numbers that do not parse
    /// are sent as absent rather than corrected.
    pub fn to_request(&self) -> Result<ScreenRequest> {
        let criteria = self.criteria.trim();
        if criteria.is_empty() {
            return Err(AppError::validation(CRITERIA_REQUIRED));
        }

        Ok(ScreenRequest {
            criteria: criteria.to_string(),
            max_results: parse_leading_int(&self.max_results),
            max_stocks_to_analyze: parse_leading_int(&self.max_stocks_to_analyze),
        })
    }
}

/// Drives `Idle -> Loading -> ResultsShown | Error` for screening submissions.
pub struct ScreeningController<V: ViewPorts> {
    api: Arc<dyn ScreenerApi>,
    view: V,
    timeout: Duration,
    state: Cell<ScreenState>,
}

impl<V: ViewPorts> ScreeningController<V> {
    pub fn new(api: Arc<dyn ScreenerApi>, view: V, timeout: Duration) -> Self {
        Self {
            api,
            view,
            timeout,
            state: Cell::new(ScreenState::Idle),
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state.get()
    }

    /// While true the submit trigger is disabled.
    pub fn is_busy(&self) -> bool {
        self.state.get() == ScreenState::Loading
    }

    pub async fn submit(&self, form: &ScreenForm) -> SubmitOutcome {
        if self.is_busy() {
            debug!("Screening already in flight; submission ignored");
            return SubmitOutcome::Busy;
        }

        let request = match form.to_request() {
            Ok(request) => request,
            Err(err) => {
                info!("Screening submission rejected: {err}");
                self.view.alert(err.to_string());
                return SubmitOutcome::Rejected;
            }
        };

        let cycle = InFlight::enter(&self.state, ScreenState::Loading, ScreenState::Idle);
        let _indicator = LoadingIndicator::show(&self.view);
        self.view.hide_results();

        info!(
            "Screening with criteria {:?} (max_results={:?}, max_stocks_to_analyze={:?})",
            request.criteria, request.max_results, request.max_stocks_to_analyze
        );

        match with_deadline(self.timeout, self.api.screen(&request)).await {
            Ok(results) => {
                let matches = results.stocks.len();
                render_results(&self.view, results);
                cycle.settle(ScreenState::ResultsShown);
                info!("Screening returned {matches} matches");
                SubmitOutcome::Shown { matches }
            }
            Err(err) => {
                error!("Screening failed: {err:?}");
                self.view.alert(failure_alert(&err));
                cycle.settle(ScreenState::Error);
                SubmitOutcome::Failed
            }
        }
    }
}

fn failure_alert(err: &AppError) -> String {
    match err {
        AppError::Rejected(None) => SCREEN_FAILED.to_string(),
        other => format!("{SCREEN_FAILED}: {other}"),
    }
}
