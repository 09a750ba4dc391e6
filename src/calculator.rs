// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::Category;

/// Result of one evaluation of the readings. Values are unrounded; use
/// [`round_2dp`] when displaying or persisting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Calculation {
    pub consumption_delta: Decimal,
    pub bill_share: Decimal,
    pub is_invalid: bool,
}

impl Calculation {
    pub fn display_bill_share(&self) -> Decimal {
        if self.is_invalid {
            Decimal::ZERO
        } else {
            self.bill_share
        }
    }
}

/// Lenient numeric read of a text field: takes the longest leading number,
/// exponent included (`"12.5kWh"` reads as 12.5, `"1e3"` as 1000), and falls
/// back to zero when there is none or it does not fit a `Decimal`.
pub fn coerce_decimal(raw: &str) -> Decimal {
    let s = raw.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let int_part = &rest[..int_len];
    let mut tail = &rest[int_len..];
    let frac_part = match tail.strip_prefix('.') {
        Some(after) => {
            let n = after.bytes().take_while(|b| b.is_ascii_digit()).count();
            tail = &after[n..];
            &after[..n]
        }
        None => "",
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Decimal::ZERO;
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let normalized = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    };
    let Ok(mantissa) = normalized.parse::<Decimal>() else {
        return Decimal::ZERO;
    };
    let value = match parse_exponent(tail) {
        Some(exp) => scale_by_pow10(mantissa, exp).unwrap_or(Decimal::ZERO),
        None => mantissa,
    };
    if negative { -value } else { value }
}

// `e`/`E`, optional sign, at least one digit; anything else is not an exponent.
fn parse_exponent(tail: &str) -> Option<i64> {
    let after = tail.strip_prefix(['e', 'E'])?;
    let (sign, digits) = match after.as_bytes().first() {
        Some(b'-') => (-1, &after[1..]),
        Some(b'+') => (1, &after[1..]),
        _ => (1, after),
    };
    let n = digits.bytes().take_while(|b| b.is_ascii_digit()).count();
    if n == 0 {
        return None;
    }
    // Saturate: anything this large overflows or underflows a Decimal anyway.
    let magnitude = digits[..n].parse::<i64>().unwrap_or(i64::MAX / 2);
    Some(sign * magnitude)
}

fn scale_by_pow10(mantissa: Decimal, exp: i64) -> Option<Decimal> {
    if exp.unsigned_abs() > 64 {
        return if exp < 0 || mantissa.is_zero() {
            Some(Decimal::ZERO)
        } else {
            None
        };
    }
    let mut v = mantissa;
    for _ in 0..exp.unsigned_abs() {
        v = if exp > 0 {
            v.checked_mul(Decimal::TEN)?
        } else {
            v.checked_div(Decimal::TEN)?
        };
    }
    Some(v.normalize())
}

/// Rounds half away from zero and pins the scale, so `50` renders as `50.00`.
pub fn round_2dp(d: Decimal) -> Decimal {
    let mut r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    r.rescale(2);
    r
}

pub fn calculate(
    previous_reading: Decimal,
    current_reading: &str,
    major_consumption: &str,
    major_bill: &str,
) -> Calculation {
    let current = coerce_decimal(current_reading);
    let consumption_delta = current
        .checked_sub(previous_reading)
        .unwrap_or(Decimal::ZERO);
    // A blank field means "not entered yet", not a regression.
    let is_invalid = !current_reading.trim().is_empty() && current < previous_reading;

    let major_consumption = coerce_decimal(major_consumption);
    let bill_share = if is_invalid || major_consumption <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        consumption_delta
            .checked_div(major_consumption)
            .and_then(|ratio| ratio.checked_mul(coerce_decimal(major_bill)))
            .unwrap_or(Decimal::ZERO)
    };

    Calculation {
        consumption_delta,
        bill_share,
        is_invalid,
    }
}

pub fn share_text(category: Category, bill_share: Decimal) -> String {
    format!("Utility Bill ({}): ${}", category, round_2dp(bill_share))
}

pub fn invalid_reading_hint(previous_reading: Decimal) -> String {
    format!("Must be higher than {}", previous_reading)
}
