//! Indian-style amount formatting and parsing.
//!
//! Amounts are grouped lakh/crore style: the last three digits form one
//! group and every two digits before them form another (`12,34,56,789`).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{MAX_AMOUNT, round_to_rupee};

/// Error returned when a string cannot be parsed as a rupee amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("amount '{input}' exceeds the maximum of {max}")]
    TooLarge { input: String, max: Decimal },
}

impl ParseAmountError {
    pub fn input(&self) -> &str {
        match self {
            Self::Invalid { input, .. } | Self::TooLarge { input, .. } => input,
        }
    }
}

/// Trims whitespace and drops the rupee sign and grouping commas.
fn normalize_amount_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '₹' && !c.is_whitespace())
        .collect()
}

/// Parses a user-entered rupee amount.
///
/// Accepts either grouping style (`"20,00,000"`, `"2,000,000"`) and an
/// optional `₹` prefix. Empty or whitespace-only input is treated as 0.
/// Amounts larger than [`MAX_AMOUNT`] in magnitude are rejected.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::parse_inr;
///
/// assert_eq!(parse_inr("₹ 20,00,000").unwrap(), dec!(2000000));
/// assert_eq!(parse_inr("").unwrap(), dec!(0));
/// assert!(parse_inr("twenty lakh").is_err());
/// ```
pub fn parse_inr(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let amount: Decimal = normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })?;

    if amount.abs() > MAX_AMOUNT {
        tracing::error!(input = %s, "amount exceeds {}", MAX_AMOUNT);
        return Err(ParseAmountError::TooLarge {
            input: s.to_string(),
            max: MAX_AMOUNT,
        });
    }
    Ok(amount)
}

/// Formats an amount in whole rupees with lakh/crore grouping.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::format_inr;
///
/// assert_eq!(format_inr(dec!(1234567)), "12,34,567");
/// assert_eq!(format_inr(dec!(999.5)), "1,000");
/// assert_eq!(format_inr(dec!(-250000)), "-2,50,000");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_to_rupee(amount);
    let digits = rounded.abs().trunc().to_string();

    let grouped = group_indian(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// [`format_inr`] with a leading `₹`.
pub fn format_rupees(amount: Decimal) -> String {
    let formatted = format_inr(amount);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-₹{rest}"),
        None => format!("₹{formatted}"),
    }
}

/// Formats a percentage with two decimals, e.g. `9.99%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{:.2}%", percent)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}
