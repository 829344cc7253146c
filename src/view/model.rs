use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::Instant;

use super::{AnswerPanel, CardList, TablePanel, ViewPorts};

/// A transient notice and the moment it should disappear.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    pub expires_at: Instant,
}

/// Everything currently on screen.
#[derive(Debug, Default)]
pub struct ViewModel {
    pub loading_visible: bool,
    pub results_visible: bool,
    pub analysis: String,
    pub stock_cards: CardList,
    pub risk_warning: String,
    pub stock_table: TablePanel,
    pub answer: AnswerPanel,
    alerts: VecDeque<String>,
    warnings: Vec<Warning>,
}

impl ViewModel {
    /// The alert currently blocking input, oldest first.
    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn alerts(&self) -> impl Iterator<Item = &str> {
        self.alerts.iter().map(String::as_str)
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// Single-threaded view model shared by the controllers and the renderers.
#[derive(Debug, Clone)]
pub struct SharedView {
    model: Rc<RefCell<ViewModel>>,
    warning_window: Duration,
}

impl SharedView {
    pub fn new(warning_window: Duration) -> Self {
        Self {
            model: Rc::new(RefCell::new(ViewModel::default())),
            warning_window,
        }
    }

    pub fn inspect<R>(&self, f: impl FnOnce(&ViewModel) -> R) -> R {
        f(&self.model.borrow())
    }

    pub fn dismiss_alert(&self) -> Option<String> {
        self.model.borrow_mut().alerts.pop_front()
    }

    pub fn take_alerts(&self) -> Vec<String> {
        self.model.borrow_mut().alerts.drain(..).collect()
    }

    /// Drop warnings whose display window has elapsed; returns how many were removed.
    pub fn expire_warnings(&self) -> usize {
        let now = Instant::now();
        let mut model = self.model.borrow_mut();
        let before = model.warnings.len();
        model.warnings.retain(|warning| warning.expires_at > now);
        before - model.warnings.len()
    }

    fn update(&self, f: impl FnOnce(&mut ViewModel)) {
        f(&mut self.model.borrow_mut());
    }
}

impl ViewPorts for SharedView {
    fn show_loading(&self) {
        self.update(|m| m.loading_visible = true);
    }

    fn hide_loading(&self) {
        self.update(|m| m.loading_visible = false);
    }

    fn show_results(&self) {
        self.update(|m| m.results_visible = true);
    }

    fn hide_results(&self) {
        self.update(|m| m.results_visible = false);
    }

    fn set_analysis(&self, text: String) {
        self.update(|m| m.analysis = text);
    }

    fn set_stock_cards(&self, cards: CardList) {
        self.update(|m| m.stock_cards = cards);
    }

    fn set_risk_warning(&self, text: String) {
        self.update(|m| m.risk_warning = text);
    }

    fn set_stock_table(&self, panel: TablePanel) {
        self.update(|m| m.stock_table = panel);
    }

    fn set_answer(&self, panel: AnswerPanel) {
        self.update(|m| m.answer = panel);
    }

    fn alert(&self, message: String) {
        self.update(|m| m.alerts.push_back(message));
    }

    fn flash_warning(&self, message: String) {
        let expires_at = Instant::now() + self.warning_window;
        self.update(|m| m.warnings.push(Warning { message, expires_at }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn warnings_expire_after_window() {
        let view = SharedView::new(Duration::from_secs(5));
        view.flash_warning("backend unreachable".into());
        assert_eq!(view.inspect(|m| m.warnings().len()), 1);

        tokio::time::advance(Duration::from_millis(4_900)).await;
        assert_eq!(view.expire_warnings(), 0);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(view.expire_warnings(), 1);
        assert!(view.inspect(|m| m.warnings().is_empty()));
    }

    #[test]
    fn alerts_queue_until_dismissed() {
        let view = SharedView::new(Duration::from_secs(5));
        view.alert("first".into());
        view.alert("second".into());

        assert_eq!(view.inspect(|m| m.current_alert().map(str::to_string)), Some("first".into()));
        assert_eq!(view.dismiss_alert().as_deref(), Some("first"));
        assert_eq!(view.inspect(|m| m.current_alert().map(str::to_string)), Some("second".into()));
        assert_eq!(view.take_alerts(), vec!["second".to_string()]);
        assert!(view.dismiss_alert().is_none());
    }

    #[test]
    fn hiding_results_keeps_content() {
        let view = SharedView::new(Duration::from_secs(5));
        view.set_analysis("previous".into());
        view.show_results();
        view.hide_results();
        view.inspect(|m| {
            assert!(!m.results_visible);
            assert_eq!(m.analysis, "previous");
        });
    }
}
