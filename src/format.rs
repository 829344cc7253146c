//! Display formatting for quote fields.
//!
//! Absent values and values that are exactly zero both render as [`PLACEHOLDER`]:
//! the service reports missing data as `0`, so a genuine zero is indistinguishable
//! from "no data" here.

pub const PLACEHOLDER: &str = "-";

/// Unit label appended to screening scores.
pub const SCORE_UNIT: &str = "pts";

const DECIMALS: usize = 2;

pub fn format_number(value: Option<f64>) -> String {
    match displayable(value) {
        Some(v) => fixed(v, DECIMALS),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match displayable(value) {
        Some(v) if v >= 0.0 => format!("+{}%", fixed(v, DECIMALS)),
        Some(v) => format!("{}%", fixed(v, DECIMALS)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Scores are shown as the service sent them, without fixed decimals.
pub fn format_score(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{v} {SCORE_UNIT}"),
        None => format!("{PLACEHOLDER} {SCORE_UNIT}"),
    }
}

fn displayable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Round half away from zero on the shortest decimal form of `value`, so `12.345`
/// becomes `12.35` even though its binary value sits just below the midpoint.
fn fixed(value: f64, places: usize) -> String {
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((&shortest, ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(places)
        .map_or(false, |digit| *digit >= b'5');
    if round_up {
        let mut idx = digits.len();
        loop {
            if idx == 0 {
                digits.insert(0, 1);
                break;
            }
            idx -= 1;
            if digits[idx] == 9 {
                digits[idx] = 0;
            } else {
                digits[idx] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let render = |slice: &[u8]| slice.iter().map(|d| char::from(b'0' + d)).collect::<String>();

    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&render(&digits[..split]));
    if places > 0 {
        out.push('.');
        out.push_str(&render(&digits[split..]));
    }
    out
}
