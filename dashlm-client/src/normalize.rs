//! Expansion of CJK magnitude words in extracted quantities
//!
//! Financial text commonly writes volumes as `100万股` or `2.8亿元`. The
//! normalizer rewrites such values to plain digits (`1000000`,
//! `280000000`) using decimal string arithmetic, so no precision is lost.
//! Anything that is not a number followed by a magnitude word is returned
//! unchanged.

use dashlm_core::{Error, Result};
use regex::Regex;

const MAGNITUDE_PATTERN: &str =
    r"^\s*([0-9]+)(?:\.([0-9]+))?\s*(万亿|千亿|百亿|十亿|亿|千万|百万|十万|万|千)\s*\p{Han}{0,2}\s*$";

/// Rewrites magnitude-suffixed numbers to plain digits
#[derive(Debug, Clone)]
pub struct NumberNormalizer {
    pattern: Regex,
}

impl NumberNormalizer {
    /// Compile the normalizer
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(MAGNITUDE_PATTERN)
            .map_err(|e| Error::Configuration(format!("Invalid magnitude pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Normalize one value, or return it unchanged
    pub fn normalize(&self, value: &str) -> String {
        let Some(caps) = self.pattern.captures(value) else {
            return value.to_string();
        };
        let integer = caps.get(1).map_or("", |m| m.as_str());
        let fraction = caps.get(2).map_or("", |m| m.as_str());
        let exponent = caps.get(3).map_or(0, |m| magnitude_exponent(m.as_str()));

        shift_decimal(integer, fraction, exponent)
    }
}

fn magnitude_exponent(word: &str) -> usize {
    match word {
        "千" => 3,
        "万" => 4,
        "十万" => 5,
        "百万" => 6,
        "千万" => 7,
        "亿" => 8,
        "十亿" => 9,
        "百亿" => 10,
        "千亿" => 11,
        "万亿" => 12,
        _ => 0,
    }
}

/// Multiply `integer.fraction` by `10^exponent` on the decimal digits
fn shift_decimal(integer: &str, fraction: &str, exponent: usize) -> String {
    let (whole, rest) = if fraction.len() <= exponent {
        let mut whole = format!("{}{}", integer, fraction);
        whole.push_str(&"0".repeat(exponent - fraction.len()));
        (whole, String::new())
    } else {
        let (moved, rest) = fraction.split_at(exponent);
        (format!("{}{}", integer, moved), rest.trim_end_matches('0').to_string())
    };

    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };

    if rest.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, rest)
    }
}
