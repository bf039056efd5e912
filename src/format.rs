//! Display formatting for currency amounts

use rust_decimal::{Decimal, RoundingStrategy};

const MAX_FRACTION_DIGITS: u32 = 3;

/// en-US style grouping: thousands separators, at most three fraction
/// digits with trailing zeros dropped, padded to `min_fraction` digits.
///
/// `245850.50` renders as `245,850.5` with `min_fraction = 0` and as
/// `245,850.50` with `min_fraction = 2`.
pub fn format_grouped(amount: Decimal, min_fraction: u32) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (digits, String::new()),
    };

    let mut out = String::with_capacity(integer.len() + integer.len() / 3 + 8);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(&integer));

    let min_fraction = min_fraction.min(MAX_FRACTION_DIGITS) as usize;
    if !fraction.is_empty() || min_fraction > 0 {
        out.push('.');
        out.push_str(&fraction);
        for _ in fraction.len()..min_fraction {
            out.push('0');
        }
    }

    out
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
