use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::api::{ScreenerApi, STOCK_LIST_LIMIT};
use crate::error::AppError;
use crate::utils::current_human_timestamp;
use crate::view::{TablePanel, ViewPorts};

use super::render::stock_table;
use super::{with_deadline, InFlight};

pub const LOAD_FAILED: &str = "Failed to load";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    TableShown,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Busy,
    Table { rows: usize },
    NoData,
    Failed,
}

/// Loads the reference stock list into the table region. Runs independently of
/// screening.
pub struct StockListLoader<V: ViewPorts> {
    api: Arc<dyn ScreenerApi>,
    view: V,
    timeout: Duration,
    state: Cell<ListState>,
}

impl<V: ViewPorts> StockListLoader<V> {
    pub fn new(api: Arc<dyn ScreenerApi>, view: V, timeout: Duration) -> Self {
        Self {
            api,
            view,
            timeout,
            state: Cell::new(ListState::Idle),
        }
    }

    pub fn state(&self) -> ListState {
        self.state.get()
    }

    pub fn is_busy(&self) -> bool {
        self.state.get() == ListState::Loading
    }

    pub async fn load(&self) -> LoadOutcome {
        if self.is_busy() {
            debug!("Stock list already loading; request ignored");
            return LoadOutcome::Busy;
        }

        let cycle = InFlight::enter(&self.state, ListState::Loading, ListState::Idle);
        let placeholder = TablePlaceholder::show(&self.view);

        match with_deadline(self.timeout, self.api.stocks(STOCK_LIST_LIMIT)).await {
            Ok(stocks) if stocks.is_empty() => {
                info!("Stock list is empty");
                placeholder.settle(TablePanel::NoData);
                cycle.settle(ListState::TableShown);
                LoadOutcome::NoData
            }
            Ok(stocks) => {
                let table = stock_table(&stocks, current_human_timestamp());
                let rows = table.rows.len();
                placeholder.settle(TablePanel::Table(table));
                cycle.settle(ListState::TableShown);
                info!("Loaded {rows} reference stocks");
                LoadOutcome::Table { rows }
            }
            Err(AppError::Rejected(message)) => {
                warn!(
                    "Stock list rejected by service: {}",
                    message.as_deref().unwrap_or("no message")
                );
                placeholder.settle(TablePanel::NoData);
                cycle.settle(ListState::TableShown);
                LoadOutcome::NoData
            }
            Err(err) => {
                error!("Stock list load failed: {err:?}");
                placeholder.settle(TablePanel::Failed(format!("{LOAD_FAILED}: {err}")));
                cycle.settle(ListState::Error);
                LoadOutcome::Failed
            }
        }
    }
}

/// Keeps the loading placeholder in the table region until a final panel is
/// written. A cycle dropped before that clears the region back to empty.
struct TablePlaceholder<'a, V: ViewPorts> {
    view: &'a V,
    settled: bool,
}

impl<'a, V: ViewPorts> TablePlaceholder<'a, V> {
    fn show(view: &'a V) -> Self {
        view.set_stock_table(TablePanel::Loading);
        Self {
            view,
            settled: false,
        }
    }

    fn settle(mut self, panel: TablePanel) {
        self.settled = true;
        self.view.set_stock_table(panel);
    }
}

impl<V: ViewPorts> Drop for TablePlaceholder<'_, V> {
    fn drop(&mut self) {
        if !self.settled {
            self.view.set_stock_table(TablePanel::Empty);
        }
    }
}
