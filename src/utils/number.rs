use serde_json::Value;

/// Coerces a loosely-typed JSON value into a number.
///
/// Values that carry no numeric meaning yield `NaN`; callers are expected to
/// discard anything that is not finite. An absent value is `NaN`, while `null`,
/// `false` and blank strings are `0`.
pub fn coerce(value: Option<&Value>) -> f64 {
    match value {
        Some(value) => coerce_value(value),
        None => f64::NAN,
    }
}

fn coerce_value(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_str(text),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [Value::Null] => 0.0,
            [Value::Bool(_)] | [Value::Object(_)] => f64::NAN,
            [only] => coerce_value(only),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn parse_str(text: &str) -> f64 {
    let text = text.trim();

    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    // f64::from_str also accepts "inf" and "nan" spellings
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

// Digits only, no sign. Accumulates in f64 so wide literals stay finite.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return f64::NAN;
    }

    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, digit| acc * radix as f64 + digit as f64)
}

/// Arithmetic mean, defined as `0` for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}
