//! Fixed-point coin amounts.
//!
//! Amounts travel to the node in base units of 10^-5 coins. Scaling is done by
//! moving the decimal point on the string form, never through floating point.

use regex::Regex;
use std::sync::OnceLock;

/// Number of decimal places in one coin.
pub const AMOUNT_DECIMALS: i64 = 5;
/// Base units per coin.
pub const AMOUNT_SCALE: u64 = 100_000;

// Exponents beyond this are treated as not number-like.
const MAX_EXPONENT: i64 = 1_000;

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-]?)(\d*)(?:\.(\d*))?(?:[eE]([+-]?\d+))?$")
            .expect("number regex must compile")
    })
}

/// A decimal number as `digits × 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    /// No leading zeros; empty means zero.
    digits: String,
    exponent: i64,
}

impl Decimal {
    fn parse(s: &str) -> Option<Self> {
        let caps = number_re().captures(s)?;
        let int_part = caps.get(2).map_or("", |m| m.as_str());
        let frac_part = caps.get(3).map_or("", |m| m.as_str());
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        let exp: i64 = match caps.get(4) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        if exp.abs() > MAX_EXPONENT {
            return None;
        }
        let digits = format!("{}{}", int_part, frac_part)
            .trim_start_matches('0')
            .to_string();
        Some(Self {
            negative: &caps[1] == "-",
            digits,
            exponent: exp - frac_part.len() as i64,
        })
    }

    fn shift(mut self, places: i64) -> Self {
        self.exponent += places;
        self
    }

    fn render(&self) -> String {
        if self.digits.is_empty() {
            return "0".to_string();
        }
        let body = if self.exponent >= 0 {
            format!("{}{}", self.digits, "0".repeat(self.exponent as usize))
        } else {
            let k = (-self.exponent) as usize;
            let (int, frac) = if self.digits.len() > k {
                let split = self.digits.len() - k;
                (self.digits[..split].to_string(), self.digits[split..].to_string())
            } else {
                (
                    "0".to_string(),
                    format!("{}{}", "0".repeat(k - self.digits.len()), self.digits),
                )
            };
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int
            } else {
                format!("{}.{}", int, frac)
            }
        };
        if self.negative {
            format!("-{}", body)
        } else {
            body
        }
    }
}

/// Whether a string parses as a number.
pub fn is_numeric(s: &str) -> bool {
    Decimal::parse(s).is_some()
}

/// Coins to base units: `"5"` becomes `"500000"`. `None` if `s` is not numeric.
pub fn scale_up(s: &str) -> Option<String> {
    Decimal::parse(s).map(|d| d.shift(AMOUNT_DECIMALS).render())
}

/// Base units to coins: `"500000"` becomes `"5"`. `None` if `s` is not numeric.
pub fn scale_down(s: &str) -> Option<String> {
    Decimal::parse(s).map(|d| d.shift(-AMOUNT_DECIMALS).render())
}
