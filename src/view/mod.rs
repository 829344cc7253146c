//! Visual regions the controllers write into.
//!
//! Controllers never touch a terminal. They write display-ready values through
//! [`ViewPorts`]; the dashboard and the console printer read them back from the
//! in-memory [`ViewModel`].

pub mod model;

pub use model::{SharedView, ViewModel, Warning};

pub const NO_MATCHES_TEXT: &str = "No matching stocks found";
pub const NO_DATA_TEXT: &str = "No data";
pub const TABLE_LOADING_TEXT: &str = "Loading stock list...";
pub const RISK_WARNING_LABEL: &str = "Risk warning:";

pub const TABLE_COLUMNS: [&str; 7] = [
    "Code",
    "Name",
    "Price",
    "Change",
    "Turnover",
    "P/E (dyn)",
    "P/B",
];

/// One screening match as shown in the results panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StockCard {
    pub name: String,
    pub code: String,
    pub score: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardList {
    Cards(Vec<StockCard>),
    /// The service matched nothing; shown instead of an empty list.
    NoMatches,
}

impl Default for CardList {
    fn default() -> Self {
        CardList::Cards(Vec::new())
    }
}

/// Colour class of the change column, taken from the raw value's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub code: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub change_tone: Tone,
    pub turnover: String,
    pub pe_dynamic: String,
    pub pb: String,
}

impl StockRow {
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.code,
            &self.name,
            &self.price,
            &self.change,
            &self.turnover,
            &self.pe_dynamic,
            &self.pb,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockTable {
    pub loaded_at: String,
    pub rows: Vec<StockRow>,
}

/// Contents of the reference-stock region.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TablePanel {
    #[default]
    Empty,
    Loading,
    Table(StockTable),
    NoData,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnswerPanel {
    #[default]
    Empty,
    Pending {
        stock_code: String,
        question: String,
    },
    Answered {
        stock_code: String,
        question: String,
        answer: String,
    },
    Failed(String),
}

/// Named handles to every region of the screen.
pub trait ViewPorts {
    fn show_loading(&self);
    fn hide_loading(&self);

    fn show_results(&self);
    /// Hide the results panel without clearing it.
    fn hide_results(&self);

    fn set_analysis(&self, text: String);
    fn set_stock_cards(&self, cards: CardList);
    fn set_risk_warning(&self, text: String);

    fn set_stock_table(&self, panel: TablePanel);
    fn set_answer(&self, panel: AnswerPanel);

    /// Blocking notice that stays until the user dismisses it.
    fn alert(&self, message: String);
    /// Floating notice removed automatically after the warning window.
    fn flash_warning(&self, message: String);
}

/// Keeps the loading indicator visible while alive and hides it on drop, so every
/// exit path of a request cycle hides it exactly once.
pub struct LoadingIndicator<'a, V: ViewPorts + ?Sized> {
    view: &'a V,
}

impl<'a, V: ViewPorts + ?Sized> LoadingIndicator<'a, V> {
    pub fn show(view: &'a V) -> Self {
        view.show_loading();
        Self { view }
    }
}

impl<V: ViewPorts + ?Sized> Drop for LoadingIndicator<'_, V> {
    fn drop(&mut self) {
        self.view.hide_loading();
    }
}
