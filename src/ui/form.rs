use crate::app::{QaForm, ScreenForm};
use crate::config::ScreeningDefaults;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    Criteria,
    MaxResults,
    MaxAnalyze,
    QaCode,
    QaQuestion,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Criteria,
        Field::MaxResults,
        Field::MaxAnalyze,
        Field::QaCode,
        Field::QaQuestion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Criteria => "Criteria",
            Field::MaxResults => "Max results",
            Field::MaxAnalyze => "Stocks to analyze",
            Field::QaCode => "Stock code",
            Field::QaQuestion => "Question",
        }
    }

    /// Whether Enter on this field submits the screening group (otherwise Q&A).
    pub fn is_screening(self) -> bool {
        matches!(self, Field::Criteria | Field::MaxResults | Field::MaxAnalyze)
    }

    /// Numeric fields only accept digits.
    fn numeric(self) -> bool {
        matches!(self, Field::MaxResults | Field::MaxAnalyze)
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text typed into the dashboard plus its focus and table scroll position.
#[derive(Clone, Debug)]
pub struct DashboardForm {
    focus: Field,
    values: [String; 5],
    pub table_offset: usize,
}

impl DashboardForm {
    pub fn new(defaults: &ScreeningDefaults) -> Self {
        Self {
            focus: Field::Criteria,
            values: [
                String::new(),
                defaults.max_results.to_string(),
                defaults.max_stocks_to_analyze.to_string(),
                String::new(),
                String::new(),
            ],
            table_offset: 0,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn insert(&mut self, ch: char) {
        if self.focus.numeric() && !ch.is_ascii_digit() {
            return;
        }
        self.values[self.focus.index()].push(ch);
    }

    pub fn backspace(&mut self) {
        self.values[self.focus.index()].pop();
    }

    pub fn screen_form(&self) -> ScreenForm {
        ScreenForm::new(
            self.value(Field::Criteria),
            self.value(Field::MaxResults),
            self.value(Field::MaxAnalyze),
        )
    }

    pub fn qa_form(&self) -> QaForm {
        QaForm::new(self.value(Field::QaCode), self.value(Field::QaQuestion))
    }

    pub fn scroll_down(&mut self, rows: usize) {
        if self.table_offset + 1 < rows {
            self.table_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.table_offset = self.table_offset.saturating_sub(1);
    }
}
