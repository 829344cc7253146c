//! Controllers driving one request/response cycle each.

use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, Result};

pub mod bootstrap;
pub mod health;
pub mod qa;
pub mod render;
pub mod screening;
pub mod stock_list;

pub use bootstrap::run;
pub use health::{HealthOutcome, HealthProbe};
pub use qa::{AskOutcome, QaForm, QaState, StockQa};
pub use screening::{ScreenForm, ScreenState, ScreeningController, SubmitOutcome};
pub use stock_list::{ListState, LoadOutcome, StockListLoader};

/// Bound a request by `timeout`; expiry is reported as a transport failure.
pub(crate) async fn with_deadline<T>(
    timeout: Duration,
    request: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(timeout, request)
        .await
        .unwrap_or_else(|_| Err(AppError::Timeout(timeout)))
}

/// Marks a controller busy for the duration of one cycle. A cycle dropped before
/// [`settle`](InFlight::settle) returns the controller to `abandoned` instead of
/// leaving it stuck in the busy state.
pub(crate) struct InFlight<'a, S: Copy + PartialEq> {
    state: &'a Cell<S>,
    busy: S,
    abandoned: S,
}

impl<'a, S: Copy + PartialEq> InFlight<'a, S> {
    pub(crate) fn enter(state: &'a Cell<S>, busy: S, abandoned: S) -> Self {
        state.set(busy);
        Self {
            state,
            busy,
            abandoned,
        }
    }

    pub(crate) fn settle(self, next: S) {
        self.state.set(next);
    }
}

impl<S: Copy + PartialEq> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if self.state.get() == self.busy {
            self.state.set(self.abandoned);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::api::{
        ChatAnswer, ChatRequest, HealthStatus, ScreenRequest, ScreenResults, ScreenerApi, Stock,
    };
    use crate::error::{AppError, Result};
    use crate::view::{AnswerPanel, CardList, SharedView, TablePanel, ViewPorts};

    pub const WINDOW: Duration = Duration::from_secs(5);
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// Scripted outcome of one fake request.
    #[derive(Clone)]
    pub enum Reply<T> {
        Ok(T),
        Reject(Option<String>),
        Status(u16, &'static str),
        Transport(&'static str),
        Hang,
    }

    impl<T: Clone> Reply<T> {
        async fn resolve(self) -> Result<T> {
            match self {
                Reply::Ok(value) => Ok(value),
                Reply::Reject(message) => Err(AppError::Rejected(message)),
                Reply::Status(status, detail) => Err(AppError::Status {
                    status,
                    detail: detail.to_string(),
                }),
                Reply::Transport(message) => Err(AppError::message(message)),
                Reply::Hang => std::future::pending().await,
            }
        }
    }

    /// Replies are consumed front to back; the last one repeats.
    struct Script<T>(Mutex<VecDeque<Reply<T>>>);

    impl<T: Clone> Script<T> {
        fn new(replies: Vec<Reply<T>>) -> Self {
            Self(Mutex::new(replies.into()))
        }

        fn next(&self) -> Reply<T> {
            let mut queue = self.0.lock().unwrap();
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap_or(Reply::Hang)
            }
        }
    }

    pub struct FakeApi {
        health: Script<HealthStatus>,
        screen: Script<ScreenResults>,
        stocks: Script<Vec<Stock>>,
        chat: Script<ChatAnswer>,
        calls: Mutex<Vec<&'static str>>,
        screen_requests: Mutex<Vec<ScreenRequest>>,
        stock_limits: Mutex<Vec<usize>>,
    }

    impl Default for FakeApi {
        fn default() -> Self {
            Self {
                health: Script::new(vec![]),
                screen: Script::new(vec![]),
                stocks: Script::new(vec![]),
                chat: Script::new(vec![]),
                calls: Mutex::new(Vec::new()),
                screen_requests: Mutex::new(Vec::new()),
                stock_limits: Mutex::new(Vec::new()),
            }
        }
    }

    impl FakeApi {
        pub fn with_health(mut self, replies: Vec<Reply<HealthStatus>>) -> Self {
            self.health = Script::new(replies);
            self
        }

        pub fn with_screen(mut self, replies: Vec<Reply<ScreenResults>>) -> Self {
            self.screen = Script::new(replies);
            self
        }

        pub fn with_stocks(mut self, replies: Vec<Reply<Vec<Stock>>>) -> Self {
            self.stocks = Script::new(replies);
            self
        }

        pub fn with_chat(mut self, replies: Vec<Reply<ChatAnswer>>) -> Self {
            self.chat = Script::new(replies);
            self
        }

        pub fn calls(&self, endpoint: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|call| **call == endpoint)
                .count()
        }

        pub fn screen_requests(&self) -> Vec<ScreenRequest> {
            self.screen_requests.lock().unwrap().clone()
        }

        pub fn stock_limits(&self) -> Vec<usize> {
            self.stock_limits.lock().unwrap().clone()
        }

        fn record(&self, endpoint: &'static str) {
            self.calls.lock().unwrap().push(endpoint);
        }
    }

    #[async_trait]
    impl ScreenerApi for FakeApi {
        async fn health(&self) -> Result<HealthStatus> {
            self.record("health");
            self.health.next().resolve().await
        }

        async fn screen(&self, request: &ScreenRequest) -> Result<ScreenResults> {
            self.record("screen");
            self.screen_requests.lock().unwrap().push(request.clone());
            self.screen.next().resolve().await
        }

        async fn stocks(&self, limit: usize) -> Result<Vec<Stock>> {
            self.record("stocks");
            self.stock_limits.lock().unwrap().push(limit);
            self.stocks.next().resolve().await
        }

        async fn ask(&self, _request: &ChatRequest) -> Result<ChatAnswer> {
            self.record("chat");
            self.chat.next().resolve().await
        }
    }

    /// Delegates to a [`SharedView`] while recording which ports were written.
    pub struct RecordingView {
        pub view: SharedView,
        calls: RefCell<Vec<&'static str>>,
    }

    impl RecordingView {
        pub fn new() -> Self {
            Self {
                view: SharedView::new(WINDOW),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }

        pub fn count(&self, port: &str) -> usize {
            self.calls.borrow().iter().filter(|c| **c == port).count()
        }

        fn record(&self, port: &'static str) {
            self.calls.borrow_mut().push(port);
        }
    }

    impl ViewPorts for RecordingView {
        fn show_loading(&self) {
            self.record("show_loading");
            self.view.show_loading();
        }

        fn hide_loading(&self) {
            self.record("hide_loading");
            self.view.hide_loading();
        }

        fn show_results(&self) {
            self.record("show_results");
            self.view.show_results();
        }

        fn hide_results(&self) {
            self.record("hide_results");
            self.view.hide_results();
        }

        fn set_analysis(&self, text: String) {
            self.record("set_analysis");
            self.view.set_analysis(text);
        }

        fn set_stock_cards(&self, cards: CardList) {
            self.record("set_stock_cards");
            self.view.set_stock_cards(cards);
        }

        fn set_risk_warning(&self, text: String) {
            self.record("set_risk_warning");
            self.view.set_risk_warning(text);
        }

        fn set_stock_table(&self, panel: TablePanel) {
            self.record("set_stock_table");
            self.view.set_stock_table(panel);
        }

        fn set_answer(&self, panel: AnswerPanel) {
            self.record("set_answer");
            self.view.set_answer(panel);
        }

        fn alert(&self, message: String) {
            self.record("alert");
            self.view.alert(message);
        }

        fn flash_warning(&self, message: String) {
            self.record("flash_warning");
            self.view.flash_warning(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Phase {
        Idle,
        Busy,
        Done,
    }

    #[test]
    fn settled_cycle_keeps_final_state() {
        let state = Cell::new(Phase::Idle);
        let cycle = InFlight::enter(&state, Phase::Busy, Phase::Idle);
        assert_eq!(state.get(), Phase::Busy);
        cycle.settle(Phase::Done);
        assert_eq!(state.get(), Phase::Done);
    }

    #[test]
    fn abandoned_cycle_falls_back() {
        let state = Cell::new(Phase::Done);
        drop(InFlight::enter(&state, Phase::Busy, Phase::Idle));
        assert_eq!(state.get(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_turns_into_timeout_error() {
        let result: Result<()> =
            with_deadline(Duration::from_secs(2), std::future::pending()).await;
        assert!(matches!(result, Err(AppError::Timeout(d)) if d == Duration::from_secs(2)));
    }
}
