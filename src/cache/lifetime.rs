//! Lifetime Module
//!
//! How long a stored response stays valid, expressed as an amount and a unit.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use crate::error::CacheError;

// == Time Unit ==
/// The fixed unit vocabulary accepted for lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    fn seconds(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 60 * 60,
            TimeUnit::Days => 24 * 60 * 60,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            other => Err(CacheError::InvalidLifetime(format!(
                "unknown time unit '{}'",
                other
            ))),
        }
    }
}

// == Lifetime ==
/// Validity window for a cached response, e.g. `5 minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lifetime {
    /// Number of units
    pub amount: u64,
    /// Unit of `amount`
    pub unit: TimeUnit,
}

impl Lifetime {
    // == Constructors ==
    pub const fn new(amount: u64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    pub const fn seconds(amount: u64) -> Self {
        Self::new(amount, TimeUnit::Seconds)
    }

    pub const fn minutes(amount: u64) -> Self {
        Self::new(amount, TimeUnit::Minutes)
    }

    pub const fn hours(amount: u64) -> Self {
        Self::new(amount, TimeUnit::Hours)
    }

    pub const fn days(amount: u64) -> Self {
        Self::new(amount, TimeUnit::Days)
    }

    // == As Duration ==
    /// Resolves the lifetime to a concrete duration.
    ///
    /// Saturates at the largest representable duration instead of overflowing.
    pub fn as_duration(&self) -> Duration {
        i64::try_from(self.amount)
            .ok()
            .and_then(|amount| amount.checked_mul(self.unit.seconds()))
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Lifetime::minutes(5)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.name())
    }
}

impl FromStr for Lifetime {
    type Err = CacheError;

    /// Parses `"5 minutes"`, `"30s"`, `"1 hour"` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(split);

        if digits.is_empty() {
            return Err(CacheError::InvalidLifetime(format!(
                "missing amount in '{}'",
                s
            )));
        }

        let amount = digits
            .parse::<u64>()
            .map_err(|e| CacheError::InvalidLifetime(format!("bad amount in '{}': {}", s, e)))?;
        let unit = unit.trim().parse::<TimeUnit>()?;

        Ok(Lifetime::new(amount, unit))
    }
}
