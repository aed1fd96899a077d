//! Route durations as reported by the Routes API.
//!
//! The `duration` field arrives either as a bare number of nanoseconds or as
//! a duration string such as `"120s"` or `"1h2m3.5s"`. Both decode into a
//! [`TravelDuration`], which serialises back to the canonical string form.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;
const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration: expected a number or a duration string, got {0}")]
    InvalidShape(&'static str),

    #[error("invalid duration {0:?}")]
    InvalidFormat(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// A signed span of time with nanosecond resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TravelDuration {
    nanos: i64,
}

impl TravelDuration {
    pub const ZERO: Self = Self { nanos: 0 };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self {
            nanos: secs.saturating_mul(NANOS_PER_SEC as i64),
        }
    }

    pub const fn as_nanos(&self) -> i64 {
        self.nanos
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }

    pub fn as_minutes_f64(&self) -> f64 {
        self.as_secs_f64() / 60.0
    }

    /// Decodes either wire shape. Numbers are truncated toward zero and
    /// saturate at the `i64` bounds.
    pub fn from_wire(value: &Value) -> Result<Self, DurationError> {
        match value {
            Value::Number(number) => {
                let ticks = number
                    .as_i64()
                    .or_else(|| number.as_f64().map(|f| f as i64))
                    .ok_or(DurationError::InvalidShape("number"))?;
                Ok(Self::from_nanos(ticks))
            }
            Value::String(text) => text.parse(),
            Value::Null => Err(DurationError::InvalidShape("null")),
            Value::Bool(_) => Err(DurationError::InvalidShape("boolean")),
            Value::Array(_) => Err(DurationError::InvalidShape("array")),
            Value::Object(_) => Err(DurationError::InvalidShape("object")),
        }
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Grammar: `[-+]?([0-9]*(\.[0-9]*)?unit)+`, or the bare string `"0"`.
impl std::str::FromStr for TravelDuration {
    type Err = DurationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationError::InvalidFormat(input.to_string());
        let overflow = || DurationError::Overflow(input.to_string());

        let (negative, mut rest) = if let Some(stripped) = input.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, input.strip_prefix('+').unwrap_or(input))
        };
        if rest == "0" {
            return Ok(Self::ZERO);
        }
        if rest.is_empty() {
            return Err(invalid());
        }

        let mut total: u64 = 0;
        while !rest.is_empty() {
            let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            let (int_digits, mut after) = rest.split_at(int_len);
            let mut frac_digits = "";
            if let Some(stripped) = after.strip_prefix('.') {
                let frac_len = stripped.bytes().take_while(u8::is_ascii_digit).count();
                (frac_digits, after) = stripped.split_at(frac_len);
            }
            if int_digits.is_empty() && frac_digits.is_empty() {
                return Err(invalid());
            }

            let unit_len = after
                .find(|c: char| c == '.' || c.is_ascii_digit())
                .unwrap_or(after.len());
            if unit_len == 0 {
                return Err(DurationError::MissingUnit(input.to_string()));
            }
            let (unit, remainder) = after.split_at(unit_len);
            let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            })?;

            let whole: u64 = if int_digits.is_empty() {
                0
            } else {
                int_digits.parse().map_err(|_| overflow())?
            };
            let value = whole
                .checked_mul(scale)
                .and_then(|whole_nanos| whole_nanos.checked_add(fraction_nanos(frac_digits, scale)))
                .ok_or_else(overflow)?;

            total = total.checked_add(value).ok_or_else(overflow)?;
            rest = remainder;
        }

        let nanos = if negative {
            0i64.checked_sub_unsigned(total).ok_or_else(overflow)?
        } else {
            i64::try_from(total).map_err(|_| overflow())?
        };
        Ok(Self::from_nanos(nanos))
    }
}

/// `0.<digits> * scale`, truncated. Digits past the 18th are ignored.
fn fraction_nanos(digits: &str, scale: u64) -> u64 {
    let (numerator, denominator) = digits
        .bytes()
        .take(MAX_FRACTION_DIGITS)
        .fold((0u128, 1u128), |(num, den), digit| {
            (num * 10 + u128::from(digit - b'0'), den * 10)
        });
    // numerator < denominator, so the quotient is below `scale`
    u64::try_from(numerator * u128::from(scale) / denominator).unwrap_or(scale)
}

fn write_fraction(f: &mut fmt::Formatter<'_>, value: u64, scale: u64) -> fmt::Result {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return write!(f, "{whole}");
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    write!(f, "{whole}.{}", digits.trim_end_matches('0'))
}

/// Canonical form: `"0s"`, `"1.5µs"`, `"250ms"`, `"2m0s"`, `"1h0m30.5s"`.
impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.nanos.unsigned_abs();
        if magnitude == 0 {
            return f.write_str("0s");
        }
        if self.nanos < 0 {
            f.write_str("-")?;
        }

        if magnitude < NANOS_PER_SEC {
            let (scale, unit) = if magnitude < NANOS_PER_MICRO {
                (1, "ns")
            } else if magnitude < NANOS_PER_MILLI {
                (NANOS_PER_MICRO, "µs")
            } else {
                (NANOS_PER_MILLI, "ms")
            };
            write_fraction(f, magnitude, scale)?;
            return f.write_str(unit);
        }

        let hours = magnitude / NANOS_PER_HOUR;
        let minutes = (magnitude % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
        let seconds = magnitude % NANOS_PER_MINUTE;
        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if hours > 0 || minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write_fraction(f, seconds, NANOS_PER_SEC)?;
        f.write_str("s")
    }
}

impl Serialize for TravelDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TravelDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_wire(&value).map_err(D::Error::custom)
    }
}
