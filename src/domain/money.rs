use std::fmt;

/// Amounts are kept as plain floating-point values, matching the `REAL` /
/// `DOUBLE PRECISION` column they are stored in. Negative and zero amounts
/// are valid (refunds, corrections).
pub type Amount = f64;

/// Format an amount with two decimals.
/// Example: 4.5 -> "4.50", -12.345 -> "-12.35"
pub fn format_amount(amount: Amount) -> String {
    // Avoid rendering "-0.00" for tiny negative residues.
    let rounded = (amount * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2}", rounded)
}

/// Parse user input into an amount.
/// Example: "4.50" -> 4.5, " 1000 " -> 1000.0, "-3" -> -3.0, "1e2" -> 100.0, "1_000" -> 1000.0
///
/// Infinities are accepted. NaN is not: it cannot be stored in a `NOT NULL`
/// SQLite column.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let digits = strip_digit_separators(input).ok_or(ParseAmountError::InvalidFormat)?;
    let amount: Amount = digits
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;
    if amount.is_nan() {
        return Err(ParseAmountError::NotANumber);
    }
    Ok(amount)
}

/// Drop `_` separators, which are only valid between two digits ("1_000").
fn strip_digit_separators(input: &str) -> Option<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    for (i, c) in chars.iter().enumerate() {
        if *c != '_' {
            out.push(*c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    NotANumber,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotANumber => write!(f, "amount is NaN"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
