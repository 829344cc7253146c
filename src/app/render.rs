//! Mapping of service payloads to display structures.

use crate::api::{ScreenResults, Stock};
use crate::format::{format_number, format_percent, format_score};
use crate::view::{
    CardList, StockCard, StockRow, StockTable, Tone, ViewPorts, RISK_WARNING_LABEL,
};

/// Write a successful screening reply: analysis, cards, risk warning, and only then
/// reveal the results panel.
pub fn render_results<V: ViewPorts + ?Sized>(view: &V, results: ScreenResults) {
    view.set_analysis(results.analysis);
    view.set_stock_cards(stock_cards(&results.stocks));
    view.set_risk_warning(format!("{RISK_WARNING_LABEL} {}", results.risk_warning));
    view.show_results();
}

pub fn stock_cards(stocks: &[Stock]) -> CardList {
    if stocks.is_empty() {
        return CardList::NoMatches;
    }

    CardList::Cards(
        stocks
            .iter()
            .map(|stock| StockCard {
                name: stock.name.clone(),
                code: stock.code.clone(),
                score: format_score(stock.score),
                reason: stock.reason.clone().unwrap_or_default(),
            })
            .collect(),
    )
}

pub fn stock_table(stocks: &[Stock], loaded_at: String) -> StockTable {
    StockTable {
        loaded_at,
        rows: stocks.iter().map(stock_row).collect(),
    }
}

pub fn stock_row(stock: &Stock) -> StockRow {
    StockRow {
        code: stock.code.clone(),
        name: stock.name.clone(),
        price: format_number(stock.price),
        change: format_percent(stock.change_pct),
        change_tone: change_tone(stock.change_pct),
        turnover: format_percent(stock.turnover_rate),
        pe_dynamic: format_number(stock.pe_dynamic),
        pb: format_number(stock.pb),
    }
}

/// Only a strictly negative raw change is negative; zero and missing values
/// count as positive.
fn change_tone(raw: Option<f64>) -> Tone {
    match raw {
        Some(value) if value < 0.0 => Tone::Negative,
        _ => Tone::Positive,
    }
}
