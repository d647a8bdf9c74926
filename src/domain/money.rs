use std::fmt;

/// Amounts are plain floating-point values with no currency attached.
pub type Amount = f64;

/// Format an amount with two decimals.
/// Example: 12.5 -> "12.50", -3.0 -> "-3.00"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse user input into an amount.
/// Example: "12.50" -> 12.5, " 40 " -> 40.0, "1e2" -> 100.0
///
/// No sign check is made: negative and zero amounts are accepted as given.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount: Amount = input
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))?;

    if !amount.is_finite() {
        return Err(ParseAmountError::NotFinite(input.to_string()));
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
    NotFinite(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat(input) => {
                write!(f, "could not convert '{}' to a number", input)
            }
            ParseAmountError::NotFinite(input) => {
                write!(f, "amount '{}' is not a finite number", input)
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}
