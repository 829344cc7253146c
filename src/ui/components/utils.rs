use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = split_vertical(
        r,
        &[
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ],
    );
    let horizontal = split_horizontal(
        vertical[1],
        &[
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ],
    );
    horizontal[1]
}

/// Box of at most `width` x `height` anchored to the top-right corner of `r`.
pub fn top_right_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(r.x + r.width - width, r.y, width, height)
}

pub fn split_vertical(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints.to_vec())
        .split(area)
        .to_vec()
}

pub fn split_horizontal(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints.to_vec())
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_right_stays_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(top_right_rect(30, 3, area), Rect::new(50, 0, 30, 3));
        assert_eq!(top_right_rect(100, 3, Rect::new(2, 1, 20, 5)), Rect::new(2, 1, 20, 3));
    }
}
