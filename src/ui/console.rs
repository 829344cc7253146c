//! Plain-text rendering of the view model for headless commands.

use std::fmt::Write as _;

use crate::utils::pad_to_width;
use crate::view::{
    AnswerPanel, CardList, SharedView, TablePanel, ViewModel, NO_DATA_TEXT, NO_MATCHES_TEXT,
    TABLE_COLUMNS,
};

const NAME_COLUMN: usize = 12;

pub fn render_view_text(model: &ViewModel) -> String {
    let mut out = String::new();

    for warning in model.warnings() {
        let _ = writeln!(out, "! {}", warning.message);
    }

    if model.results_visible {
        let _ = writeln!(out, "{}\n", model.analysis);
        match &model.stock_cards {
            CardList::NoMatches => {
                let _ = writeln!(out, "{NO_MATCHES_TEXT}");
            }
            CardList::Cards(cards) => {
                for card in cards {
                    let _ = writeln!(out, "{} ({})  {}", card.name, card.code, card.score);
                    if !card.reason.is_empty() {
                        let _ = writeln!(out, "    {}", card.reason);
                    }
                }
            }
        }
        let _ = writeln!(out, "\n{}", model.risk_warning);
    }

    match &model.stock_table {
        TablePanel::Empty | TablePanel::Loading => {}
        TablePanel::NoData => {
            let _ = writeln!(out, "{NO_DATA_TEXT}");
        }
        TablePanel::Failed(message) => {
            let _ = writeln!(out, "{message}");
        }
        TablePanel::Table(table) => {
            let _ = writeln!(out, "Loaded at {}", table.loaded_at);
            let _ = writeln!(out, "{}", table_line(TABLE_COLUMNS));
            for row in &table.rows {
                let _ = writeln!(out, "{}", table_line(row.cells()));
            }
        }
    }

    match &model.answer {
        AnswerPanel::Empty | AnswerPanel::Pending { .. } => {}
        AnswerPanel::Answered {
            stock_code,
            question,
            answer,
        } => {
            let _ = writeln!(out, "[{stock_code}] {question}\n{answer}");
        }
        AnswerPanel::Failed(message) => {
            let _ = writeln!(out, "{message}");
        }
    }

    out
}

fn table_line(cells: [&str; 7]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let width = if idx == 1 { NAME_COLUMN } else { 10 };
            pad_to_width(cell, width)
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Print the view to stdout and any queued alerts to stderr.
pub fn print_view(view: &SharedView) {
    print!("{}", view.inspect(render_view_text));
    for alert in view.take_alerts() {
        eprintln!("{alert}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{StockCard, ViewPorts};
    use std::time::Duration;

    fn view() -> SharedView {
        SharedView::new(Duration::from_secs(5))
    }

    #[test]
    fn results_print_only_when_visible() {
        let view = view();
        view.set_analysis("Banks look cheap".into());
        view.set_stock_cards(CardList::Cards(vec![StockCard {
            name: "招商银行".into(),
            code: "600036".into(),
            score: "88 pts".into(),
            reason: "Low P/B".into(),
        }]));
        view.set_risk_warning("Risk warning: not advice".into());
        assert_eq!(view.inspect(render_view_text), "");

        view.show_results();
        let text = view.inspect(render_view_text);
        assert!(text.contains("招商银行 (600036)  88 pts"));
        assert!(text.contains("    Low P/B"));
        assert!(text.ends_with("Risk warning: not advice\n"));
    }

    #[test]
    fn table_failures_and_answers_are_printed() {
        let view = view();
        view.set_stock_table(TablePanel::Failed("Failed to load: boom".into()));
        view.set_answer(AnswerPanel::Answered {
            stock_code: "600036".into(),
            question: "PE?".into(),
            answer: "About 6".into(),
        });

        assert_eq!(
            view.inspect(render_view_text),
            "Failed to load: boom\n[600036] PE?\nAbout 6\n"
        );
    }

    #[test]
    fn table_columns_align_wide_names() {
        assert_eq!(
            table_line(["600036", "招商银行", "35.20", "+1.00%", "-", "6.10", "0.90"]),
            "600036     招商银行     35.20      +1.00%     -          6.10       0.90"
        );
    }
}
