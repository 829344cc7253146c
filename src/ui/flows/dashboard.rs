use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use log::{debug, info};

use crate::api::ScreenerApi;
use crate::app::{HealthProbe, ScreeningController, StockListLoader, StockQa};
use crate::config::Config;
use crate::error::Result;
use crate::ui::components::TerminalGuard;
use crate::ui::form::DashboardForm;
use crate::ui::screens::dashboard::{draw, Activity};
use crate::view::{SharedView, TablePanel};

/// What the event loop should do after a key press.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyAction {
    None,
    Quit,
    Screen,
    LoadStocks,
    Ask,
}

/// Interpret one key press. Editing happens in place; anything that needs the
/// network is returned to the caller.
pub fn handle_key(key: KeyEvent, view: &SharedView, form: &mut DashboardForm) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    // A pending alert is modal.
    if view.inspect(|model| model.current_alert().is_some()) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            view.dismiss_alert();
        }
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::F(5) => KeyAction::LoadStocks,
        KeyCode::Char('r') if ctrl => KeyAction::LoadStocks,
        KeyCode::Enter if form.focus().is_screening() => KeyAction::Screen,
        KeyCode::Enter => KeyAction::Ask,
        KeyCode::Tab => {
            form.focus_next();
            KeyAction::None
        }
        KeyCode::BackTab => {
            form.focus_prev();
            KeyAction::None
        }
        KeyCode::Backspace => {
            form.backspace();
            KeyAction::None
        }
        KeyCode::PageDown | KeyCode::Down => {
            let rows = view.inspect(|model| match &model.stock_table {
                TablePanel::Table(table) => table.rows.len(),
                _ => 0,
            });
            form.scroll_down(rows);
            KeyAction::None
        }
        KeyCode::PageUp | KeyCode::Up => {
            form.scroll_up();
            KeyAction::None
        }
        KeyCode::Char(ch) if !ctrl => {
            form.insert(ch);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Run the interactive dashboard until the user quits.
///
/// Request futures borrow the controllers and are polled on this task alongside
/// input handling, so every view update happens on one logical thread.
pub async fn run_dashboard(config: &Config, api: Arc<dyn ScreenerApi>, view: SharedView) -> Result<()> {
    let timeout = config.api.request_timeout();
    let health = HealthProbe::new(api.clone(), view.clone(), timeout);
    let screening = ScreeningController::new(api.clone(), view.clone(), timeout);
    let loader = StockListLoader::new(api.clone(), view.clone(), timeout);
    let qa = StockQa::new(api, view.clone(), timeout);

    let (health, screening, loader, qa) = (&health, &screening, &loader, &qa);
    let mut form = DashboardForm::new(&config.screening);
    let mut pending: FuturesUnordered<LocalBoxFuture<'_, ()>> = FuturesUnordered::new();
    pending.push(health.run().map(|_| ()).boxed_local());

    let mut guard = TerminalGuard::new()?;
    let mut ticker = tokio::time::interval(config.ui.tick());
    info!("Dashboard started");

    loop {
        view.expire_warnings();
        let activity = Activity {
            screening: screening.is_busy(),
            stocks: loader.is_busy(),
            asking: qa.is_busy(),
        };
        view.inspect(|model| {
            guard
                .terminal_mut()
                .draw(|frame| draw(frame, model, &form, activity, &config.api.base_url))
                .map(|_| ())
        })?;

        tokio::select! {
            Some(()) = pending.next(), if !pending.is_empty() => {}
            _ = ticker.tick() => {}
        }

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(key, &view, &mut form) {
                KeyAction::None => {}
                KeyAction::Quit => {
                    info!("Dashboard closed with {} request(s) in flight", pending.len());
                    return guard.restore();
                }
                KeyAction::Screen if screening.is_busy() => debug!("Screen key ignored while busy"),
                KeyAction::Screen => {
                    let request = form.screen_form();
                    pending.push(
                        async move {
                            screening.submit(&request).await;
                        }
                        .boxed_local(),
                    );
                }
                KeyAction::LoadStocks if loader.is_busy() => debug!("Reload ignored while loading"),
                KeyAction::LoadStocks => {
                    form.table_offset = 0;
                    pending.push(loader.load().map(|_| ()).boxed_local());
                }
                KeyAction::Ask if qa.is_busy() => debug!("Ask key ignored while waiting"),
                KeyAction::Ask => {
                    let request = form.qa_form();
                    pending.push(
                        async move {
                            qa.ask(&request).await;
                        }
                        .boxed_local(),
                    );
                }
            }
        }
    }
}
