use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::components::{
    build_table,
    table::stock_row,
    utils::{centered_rect, split_horizontal, split_vertical, top_right_rect},
};
use crate::ui::form::{DashboardForm, Field};
use crate::view::{
    AnswerPanel, CardList, TablePanel, ViewModel, NO_DATA_TEXT, NO_MATCHES_TEXT,
    TABLE_LOADING_TEXT,
};

/// Which triggers are currently disabled because their request is in flight.
#[derive(Clone, Copy, Debug, Default)]
pub struct Activity {
    pub screening: bool,
    pub stocks: bool,
    pub asking: bool,
}

pub fn draw(frame: &mut Frame, model: &ViewModel, form: &DashboardForm, activity: Activity, base_url: &str) {
    let area = frame.size();
    let rows = split_vertical(
        area,
        &[
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(7),
            Constraint::Length(1),
        ],
    );

    let header = Line::from(vec![
        Span::styled("AI Stock Screener", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  ·  {base_url}")),
    ]);
    frame.render_widget(Paragraph::new(header), rows[0]);

    draw_form(frame, rows[1], form, activity);

    if model.loading_visible {
        let loading = Paragraph::new("Analyzing... this can take a minute.")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(loading, rows[2]);
    }

    let body = split_horizontal(rows[3], &[Constraint::Percentage(45), Constraint::Percentage(55)]);
    draw_results(frame, body[0], model);
    draw_stock_table(frame, body[1], &model.stock_table, form.table_offset);

    draw_answer(frame, rows[4], &model.answer);

    let reload = if activity.stocks {
        "stock list loading..."
    } else {
        "F5/Ctrl-R stock list"
    };
    let hints = Paragraph::new(format!(
        "Tab/Shift-Tab focus · Enter submit · {reload} · PgUp/PgDn scroll · Esc quit"
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, rows[5]);

    draw_warnings(frame, area, model);

    if let Some(message) = model.current_alert() {
        draw_alert(frame, area, message);
    }
}

fn draw_form(frame: &mut Frame, area: Rect, form: &DashboardForm, activity: Activity) {
    let columns = split_horizontal(area, &[Constraint::Percentage(60), Constraint::Percentage(40)]);

    let screen_title = if activity.screening {
        "Screening (running...)"
    } else {
        "Screening [Enter]"
    };
    let screen_lines: Vec<Line> = [Field::Criteria, Field::MaxResults, Field::MaxAnalyze]
        .into_iter()
        .map(|field| field_line(form, field))
        .collect();
    frame.render_widget(
        Paragraph::new(screen_lines).block(Block::default().borders(Borders::ALL).title(screen_title)),
        columns[0],
    );

    let qa_title = if activity.asking {
        "Ask (waiting...)"
    } else {
        "Ask [Enter]"
    };
    let qa_lines: Vec<Line> = [Field::QaCode, Field::QaQuestion]
        .into_iter()
        .map(|field| field_line(form, field))
        .collect();
    frame.render_widget(
        Paragraph::new(qa_lines).block(Block::default().borders(Borders::ALL).title(qa_title)),
        columns[1],
    );
}

fn field_line(form: &DashboardForm, field: Field) -> Line<'static> {
    let focused = form.focus() == field;
    let marker = if focused { "> " } else { "  " };
    let cursor = if focused { "▏" } else { "" };
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{marker}{}: ", field.label()), style),
        Span::raw(format!("{}{cursor}", form.value(field))),
    ])
}

fn draw_results(frame: &mut Frame, area: Rect, model: &ViewModel) {
    let block = Block::default().borders(Borders::ALL).title("Results");
    if !model.results_visible {
        frame.render_widget(block, area);
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled("Analysis", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(model.analysis.clone()),
        Line::from(""),
    ];

    match &model.stock_cards {
        CardList::NoMatches => lines.push(Line::from(NO_MATCHES_TEXT)),
        CardList::Cards(cards) => {
            for card in cards {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ({})", card.name, card.code),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", card.score), Style::default().fg(Color::Cyan)),
                ]));
                lines.push(Line::from(format!("  {}", card.reason)));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        model.risk_warning.clone(),
        Style::default().fg(Color::Yellow),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_stock_table(frame: &mut Frame, area: Rect, panel: &TablePanel, offset: usize) {
    let placeholder = |text: String| {
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Reference stocks"))
    };

    match panel {
        TablePanel::Empty => frame.render_widget(placeholder("Press F5 to load.".into()), area),
        TablePanel::Loading => frame.render_widget(placeholder(TABLE_LOADING_TEXT.into()), area),
        TablePanel::NoData => frame.render_widget(placeholder(NO_DATA_TEXT.into()), area),
        TablePanel::Failed(message) => frame.render_widget(
            placeholder(message.clone()).style(Style::default().fg(Color::Red)),
            area,
        ),
        TablePanel::Table(table) => {
            let rows = table.rows.iter().skip(offset).map(stock_row).collect();
            let title = format!("Reference stocks ({}) · loaded {}", table.rows.len(), table.loaded_at);
            frame.render_widget(build_table(rows, title), area);
        }
    }
}

fn draw_answer(frame: &mut Frame, area: Rect, panel: &AnswerPanel) {
    let lines: Vec<Line> = match panel {
        AnswerPanel::Empty => vec![Line::from("Ask about a stock with the form above.")],
        AnswerPanel::Pending { stock_code, question } => vec![
            Line::from(format!("{stock_code}: {question}")),
            Line::from(Span::styled("Thinking...", Style::default().fg(Color::Yellow))),
        ],
        AnswerPanel::Answered {
            stock_code,
            question,
            answer,
        } => vec![
            Line::from(Span::styled(
                format!("{stock_code}: {question}"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(answer.clone()),
        ],
        AnswerPanel::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
    };

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Q&A"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_warnings(frame: &mut Frame, area: Rect, model: &ViewModel) {
    let warnings = model.warnings();
    if warnings.is_empty() {
        return;
    }

    let lines: Vec<Line> = warnings
        .iter()
        .map(|warning| Line::from(warning.message.clone()))
        .collect();
    let height = (lines.len() as u16).saturating_mul(2).saturating_add(2);
    let popup = top_right_rect(48, height, area);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Warning"))
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn draw_alert(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(60, 30, area);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Notice")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true }),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreeningDefaults;
    use crate::view::{SharedView, StockRow, StockTable, Tone, ViewPorts};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn render(view: &SharedView) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let form = DashboardForm::new(&ScreeningDefaults::default());
        view.inspect(|model| {
            terminal
                .draw(|frame| draw(frame, model, &form, Activity::default(), "http://localhost:8000"))
                .unwrap();
        });
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn alert_and_table_are_drawn() {
        let view = SharedView::new(Duration::from_secs(5));
        view.set_stock_table(TablePanel::Table(StockTable {
            loaded_at: "2024-01-01 09:30:00".into(),
            rows: vec![StockRow {
                code: "600000".into(),
                name: "PFYH".into(),
                price: "10.01".into(),
                change: "-3.33%".into(),
                change_tone: Tone::Negative,
                turnover: "-".into(),
                pe_dynamic: "-".into(),
                pb: "1.20".into(),
            }],
        }));
        view.alert("Please enter screening criteria.".into());

        let screen = render(&view);
        assert!(screen.contains("600000"));
        assert!(screen.contains("-3.33%"));
        assert!(screen.contains("Notice"));
    }

    #[test]
    fn hidden_results_are_not_drawn() {
        let view = SharedView::new(Duration::from_secs(5));
        view.set_analysis("secret analysis".into());
        assert!(!render(&view).contains("secret"));
        view.show_results();
        assert!(render(&view).contains("secret"));
    }
}
