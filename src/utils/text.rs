use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`.
/// Wide CJK characters count as two columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad with spaces so the result occupies exactly `width` columns when it fits.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = display_width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_counts_double() {
        assert_eq!(display_width("招商银行"), 8);
        assert_eq!(display_width("ABC"), 3);
    }

    #[test]
    fn truncation_respects_columns() {
        assert_eq!(truncate_to_width("招商银行", 8), "招商银行");
        assert_eq!(truncate_to_width("招商银行", 6), "招商…");
        assert_eq!(truncate_to_width("Ping An", 4), "Pin…");
    }

    #[test]
    fn padding_fills_columns() {
        assert_eq!(pad_to_width("银行", 6), "银行  ");
        assert_eq!(pad_to_width("toolong", 3), "toolong");
    }
}
