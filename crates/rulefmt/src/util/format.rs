pub const DEFAULT_PRECISION: u32 = 4;
pub const MAX_PRECISION: u32 = 12;

/// Round `value` to `precision` decimal places.
///
/// Negative zero collapses to `0.0`. Values too large to carry a fractional
/// part at this precision are returned unchanged.
pub fn round_threshold(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * factor;
    let rounded = if scaled.abs() < 9_007_199_254_740_992.0 {
        scaled.round() / factor
    } else {
        value
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest round-trip form of the rounded value in positional notation,
/// always with a decimal point: `12.0`, `77.186`, `0.0546`, `inf`.
pub fn format_threshold(value: f64, precision: u32) -> String {
    let rounded = round_threshold(value, precision);
    if rounded.is_infinite() {
        return if rounded > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    let mut text = format!("{}", rounded);
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

pub fn parse_number(s: &str) -> Result<f64, String> {
    let trimmed = s.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("Invalid number: {}", trimmed))?;
    if value.is_nan() {
        return Err(format!("Invalid number: {}", trimmed));
    }
    Ok(value)
}

/// Parse a comma-separated row of values. Empty fields and `nan` become NaN.
pub fn parse_row(s: &str) -> Result<Vec<f64>, String> {
    s.split(',')
        .map(|field| {
            let field = field.trim();
            if field.is_empty() || field.eq_ignore_ascii_case("nan") {
                Ok(f64::NAN)
            } else {
                parse_number(field)
            }
        })
        .collect()
}

pub fn parse_name_list(s: &str) -> Vec<String> {
    s.split(',').map(|name| name.trim().to_string()).collect()
}
