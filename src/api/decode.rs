use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a JSON number, a numeric string, or null. Anything else decodes as absent.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

/// Accept a JSON string or number for a text field. Null and other shapes decode
/// as absent, so one odd field never sinks the whole reply.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
}

/// [`lenient_string`] for fields that render as empty text when absent.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_f64(s),
        _ => None,
    }
}

pub fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Leading-integer parse used for the numeric form fields: optional whitespace and
/// sign, then as many digits as are present. `"12abc"` is 12, `"abc"` is `None`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &rest[..end],
        None => rest,
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Pull the human-readable message out of an error body (`{"detail": ...}`,
/// `{"error": ...}` or `{"message": ...}`).
pub fn error_detail(body: &str) -> Option<String> {
    let root: Value = serde_json::from_str(body).ok()?;
    ["detail", "error", "message"]
        .iter()
        .filter_map(|key| root.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        })
}
