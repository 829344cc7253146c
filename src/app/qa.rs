use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::api::{ChatRequest, ScreenerApi};
use crate::error::{AppError, Result};
use crate::view::{AnswerPanel, ViewPorts};

use super::{with_deadline, InFlight};

pub const QA_FIELDS_REQUIRED: &str = "Please enter a stock code and a question.";
pub const QA_FAILED: &str = "Q&A failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QaState {
    Idle,
    Loading,
    Answered,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    Rejected,
    Busy,
    Answered,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QaForm {
    pub stock_code: String,
    pub question: String,
}

impl QaForm {
    pub fn new(stock_code: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            stock_code: stock_code.into(),
            question: question.into(),
        }
    }

    pub fn to_request(&self) -> Result<ChatRequest> {
        let stock_code = self.stock_code.trim();
        let question = self.question.trim();
        if stock_code.is_empty() || question.is_empty() {
            return Err(AppError::validation(QA_FIELDS_REQUIRED));
        }

        Ok(ChatRequest {
            stock_code: stock_code.to_string(),
            question: question.to_string(),
        })
    }
}

/// Asks the backend a free-form question about one stock.
pub struct StockQa<V: ViewPorts> {
    api: Arc<dyn ScreenerApi>,
    view: V,
    timeout: Duration,
    state: Cell<QaState>,
}

impl<V: ViewPorts> StockQa<V> {
    pub fn new(api: Arc<dyn ScreenerApi>, view: V, timeout: Duration) -> Self {
        Self {
            api,
            view,
            timeout,
            state: Cell::new(QaState::Idle),
        }
    }

    pub fn state(&self) -> QaState {
        self.state.get()
    }

    pub fn is_busy(&self) -> bool {
        self.state.get() == QaState::Loading
    }

    pub async fn ask(&self, form: &QaForm) -> AskOutcome {
        if self.is_busy() {
            debug!("Question already pending; request ignored");
            return AskOutcome::Busy;
        }

        let request = match form.to_request() {
            Ok(request) => request,
            Err(err) => {
                self.view.alert(err.to_string());
                return AskOutcome::Rejected;
            }
        };

        let cycle = InFlight::enter(&self.state, QaState::Loading, QaState::Idle);
        self.view.set_answer(AnswerPanel::Pending {
            stock_code: request.stock_code.clone(),
            question: request.question.clone(),
        });
        info!("Asking about {}", request.stock_code);

        match with_deadline(self.timeout, self.api.ask(&request)).await {
            Ok(reply) => {
                self.view.set_answer(AnswerPanel::Answered {
                    stock_code: reply.stock_code,
                    question: reply.question,
                    answer: reply.answer,
                });
                cycle.settle(QaState::Answered);
                AskOutcome::Answered
            }
            Err(err) => {
                error!("Question about {} failed: {err:?}", request.stock_code);
                self.view
                    .set_answer(AnswerPanel::Failed(format!("{QA_FAILED}: {err}")));
                cycle.settle(QaState::Error);
                AskOutcome::Failed
            }
        }
    }
}
