//! Bar interval configuration.
//!
//! Intervals are specified as `<count><unit>` strings such as `"1min"`,
//! `"5min"` or `"1H"` and resolve to a fixed number of milliseconds.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed wall-clock bar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    millis: i64,
}

impl Interval {
    /// Create an interval from a millisecond count.
    pub fn from_millis(millis: i64) -> Result<Self> {
        if millis <= 0 {
            return Err(Error::invalid_configuration(format!(
                "interval must be positive, got {millis} ms"
            )));
        }
        Ok(Self { millis })
    }

    /// Interval length in milliseconds.
    #[inline]
    pub fn millis(&self) -> i64 {
        self.millis
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| Error::invalid_configuration(format!("interval '{s}' has no unit")))?;
        let (count, unit) = s.split_at(split);
        let count: i64 = count.parse().map_err(|_| {
            Error::invalid_configuration(format!("interval '{s}' has no leading count"))
        })?;
        let unit_ms = match unit.to_ascii_lowercase().as_str() {
            "s" | "sec" => 1_000,
            "m" | "min" => 60_000,
            "h" | "hr" => 3_600_000,
            "d" | "day" => 86_400_000,
            _ => {
                return Err(Error::invalid_configuration(format!(
                    "unknown interval unit '{unit}' in '{s}'"
                )))
            }
        };
        let millis = count.checked_mul(unit_ms).ok_or_else(|| {
            Error::invalid_configuration(format!("interval '{s}' is out of range"))
        })?;
        Interval::from_millis(millis)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis % 3_600_000 == 0 {
            write!(f, "{}h", self.millis / 3_600_000)
        } else if self.millis % 60_000 == 0 {
            write!(f, "{}min", self.millis / 60_000)
        } else {
            write!(f, "{}s", self.millis / 1_000)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes() {
        let interval: Interval = "5min".parse().unwrap();
        assert_eq!(interval.millis(), 300_000);
        let interval: Interval = "1m".parse().unwrap();
        assert_eq!(interval.millis(), 60_000);
    }

    #[test]
    fn test_parse_hours_case_insensitive() {
        let interval: Interval = "1H".parse().unwrap();
        assert_eq!(interval.millis(), 3_600_000);
        let interval: Interval = "4h".parse().unwrap();
        assert_eq!(interval.millis(), 14_400_000);
    }

    #[test]
    fn test_parse_seconds_and_days() {
        let interval: Interval = "30s".parse().unwrap();
        assert_eq!(interval.millis(), 30_000);
        let interval: Interval = "1d".parse().unwrap();
        assert_eq!(interval.millis(), 86_400_000);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("".parse::<Interval>().is_err());
        assert!("min".parse::<Interval>().is_err());
        assert!("5".parse::<Interval>().is_err());
        assert!("5fortnights".parse::<Interval>().is_err());
        assert!("0min".parse::<Interval>().is_err());
    }

    #[test]
    fn test_rejects_overflowing_count() {
        // Parseable counts whose millisecond value exceeds i64 must fail
        // cleanly, not overflow.
        assert!("200000000000000d".parse::<Interval>().is_err());
        assert!("9223372036854775807min".parse::<Interval>().is_err());
    }

    #[test]
    fn test_rejects_non_positive_millis() {
        assert!(Interval::from_millis(0).is_err());
        assert!(Interval::from_millis(-60_000).is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["30s", "5min", "2h"] {
            let interval: Interval = s.parse().unwrap();
            assert_eq!(interval.to_string(), s);
        }
    }
}
