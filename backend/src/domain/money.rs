//! Money arithmetic at the form boundary.
//!
//! Amounts are entered in major currency units and stored upstream in integer
//! cents. Conversion parses the decimal string directly, so every valid input
//! maps to an exact cent value; a half-cent rounds up (`"10.005"` -> `1001`).

/// Convert a user-entered amount string to integer cents.
///
/// Accepts an optional sign, a currency symbol, commas and spaces, and up to
/// any number of fraction digits; the third fraction digit decides
/// round-half-up. Returns a human-readable parse error otherwise.
pub fn to_cents(input: &str) -> Result<i64, String> {
    let cleaned = input
        .trim()
        .replace('$', "")
        .replace(',', "")
        .replace(' ', "");
    if cleaned.is_empty() {
        return Err("amount is empty".to_string());
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err("amount has no digits".to_string());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid amount: {}", input.trim()));
    }
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid amount: {}", input.trim()));
    }

    let mut cents: i64 = 0;
    for digit in whole.bytes() {
        cents = cents
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit - b'0')))
            .ok_or_else(|| "amount is too large".to_string())?;
    }
    cents = cents
        .checked_mul(100)
        .ok_or_else(|| "amount is too large".to_string())?;

    let mut fraction_digits = fraction.bytes().map(|d| i64::from(d - b'0'));
    let tens = fraction_digits.next().unwrap_or(0);
    let ones = fraction_digits.next().unwrap_or(0);
    cents = cents
        .checked_add(tens * 10 + ones)
        .ok_or_else(|| "amount is too large".to_string())?;
    if fraction_digits.next().unwrap_or(0) >= 5 {
        cents = cents
            .checked_add(1)
            .ok_or_else(|| "amount is too large".to_string())?;
    }

    Ok(if negative { -cents } else { cents })
}

/// Format integer cents as a display currency string, e.g. `$1,234.56`.
pub fn format_currency(cents: i64) -> String {
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let remainder = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if cents < 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, remainder)
}
