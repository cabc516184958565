use serde_json::{Number, Value};

/// How DynamoDB numbers, which are arbitrary-precision decimals, are written to JSON.
pub trait DecimalEncoding: Send + Sync {
    /// Returns `None` when the decimal cannot be represented by this encoding.
    fn encode_decimal(&self, decimal: &str) -> Option<Value>;
}

/// Writes the decimal as a JSON string, so no precision is lost.
///
/// Every digit is kept. Values written with a positive exponent, or smaller
/// than `1E-6`, use exponent notation: `0.0000001` becomes `"1E-7"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalAsString;

impl DecimalEncoding for DecimalAsString {
    fn encode_decimal(&self, decimal: &str) -> Option<Value> {
        to_decimal_string(decimal).map(Value::String)
    }
}

/// Render a decimal in the General Decimal Arithmetic to-scientific-string form.
///
/// The coefficient keeps its trailing zeros (`1.50` stays `1.50`). Exponent
/// notation is used when the exponent is positive or the value would need
/// more than six leading zeros after the point.
fn to_decimal_string(decimal: &str) -> Option<String> {
    let (negative, unsigned) = match decimal.as_bytes().first()? {
        b'-' => (true, &decimal[1..]),
        b'+' => (false, &decimal[1..]),
        _ => (false, decimal),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(index) => (&unsigned[..index], unsigned[index + 1..].parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }
    if !int_digits
        .bytes()
        .chain(frac_digits.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let digits: String = format!("{int_digits}{frac_digits}");
    let trimmed: &str = digits.trim_start_matches('0');
    let coefficient: &str = if trimmed.is_empty() { "0" } else { trimmed };
    let exponent: i64 = exponent.checked_sub(i64::try_from(frac_digits.len()).ok()?)?;

    let len: i64 = i64::try_from(coefficient.len()).ok()?;
    let left_digits: i64 = exponent.checked_add(len)?;
    let dot_place: i64 = if exponent <= 0 && left_digits > -6 {
        left_digits
    } else {
        1
    };

    let mut out: String = String::new();
    if negative {
        out.push('-');
    }

    if dot_place <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat(usize::try_from(-dot_place).ok()?));
        out.push_str(coefficient);
    } else if dot_place >= len {
        out.push_str(coefficient);
        out.push_str(&"0".repeat(usize::try_from(dot_place - len).ok()?));
    } else {
        let split: usize = usize::try_from(dot_place).ok()?;
        out.push_str(&coefficient[..split]);
        out.push('.');
        out.push_str(&coefficient[split..]);
    }

    if left_digits != dot_place {
        out.push_str(&format!("E{:+}", left_digits - dot_place));
    }

    Some(out)
}

/// Writes the decimal as a JSON number.
///
/// Integers that fit in 64 bits are exact. Anything else goes through `f64`
/// and may lose precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalAsNumber;

impl DecimalEncoding for DecimalAsNumber {
    fn encode_decimal(&self, decimal: &str) -> Option<Value> {
        if let Ok(int) = decimal.parse::<i64>() {
            return Some(Value::Number(int.into()));
        }
        if let Ok(uint) = decimal.parse::<u64>() {
            return Some(Value::Number(uint.into()));
        }

        decimal
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    }
}
