use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::utils::truncate_to_width;
use crate::view::{StockRow, Tone, TABLE_COLUMNS};

/// Column widths; the name column is measured in terminal cells.
pub const COLUMN_WIDTHS: [u16; 7] = [8, 12, 9, 9, 9, 10, 7];

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
    }
}

pub fn stock_row<'a>(row: &'a StockRow) -> Row<'a> {
    let name = truncate_to_width(&row.name, COLUMN_WIDTHS[1] as usize);
    Row::new(vec![
        Cell::from(row.code.as_str()),
        Cell::from(name),
        Cell::from(row.price.as_str()),
        Cell::from(row.change.as_str()).style(Style::default().fg(tone_color(row.change_tone))),
        Cell::from(row.turnover.as_str()),
        Cell::from(row.pe_dynamic.as_str()),
        Cell::from(row.pb.as_str()),
    ])
}

pub fn build_table<'a>(rows: Vec<Row<'a>>, title: impl Into<String>) -> Table<'a> {
    let header = Row::new(TABLE_COLUMNS.to_vec())
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths: Vec<Constraint> = COLUMN_WIDTHS.iter().copied().map(Constraint::Length).collect();

    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.into()))
        .column_spacing(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_colour_follows_tone() {
        assert_eq!(tone_color(Tone::Negative), Color::Red);
        assert_eq!(tone_color(Tone::Positive), Color::Green);
    }
}
