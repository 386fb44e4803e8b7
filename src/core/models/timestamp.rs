use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::errors::{RangeError, TimestampError};

/// Number of digits in an encoded timestamp.
pub const TIMESTAMP_LEN: usize = 14;

/// Length of an encoded range: two timestamps joined by `-`.
pub const RANGE_LEN: usize = TIMESTAMP_LEN * 2 + 1;

/// Wall-clock instant at one-second resolution, encoded as `YYYYMMDDHHMMSS`.
///
/// Held as the integer value of the 14 digits, so numeric order, string
/// order of the zero-padded encoding, and chronological order all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Current local time.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Encode any zoned datetime using its own local fields.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let year = u64::from(dt.year().clamp(0, 9999) as u32);
        let value = year * 10_000_000_000
            + u64::from(dt.month()) * 100_000_000
            + u64::from(dt.day()) * 1_000_000
            + u64::from(dt.hour()) * 10_000
            + u64::from(dt.minute()) * 100
            + u64::from(dt.second());
        Self(value)
    }

    /// Raw numeric value of the 14 digits.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:014}", self.0)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    /// Parse exactly 14 ASCII digits. Calendar validity is not checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != TIMESTAMP_LEN {
            return Err(TimestampError::WrongLength { len: s.len() });
        }

        let mut value = 0u64;
        for (position, byte) in s.bytes().enumerate() {
            if !byte.is_ascii_digit() {
                return Err(TimestampError::NonDigit { position });
            }
            value = value * 10 + u64::from(byte - b'0');
        }

        Ok(Self(value))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive `[start, end]` window over encoded timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    /// Whether `ts` falls inside the window, bounds included.
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts <= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = RangeError;

    /// Parse `YYYYMMDDHHMMSS-YYYYMMDDHHMMSS` with start <= end.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != RANGE_LEN {
            return Err(RangeError::WrongLength { len: s.len() });
        }

        let (start, end) = match (
            s.get(..TIMESTAMP_LEN),
            s.get(TIMESTAMP_LEN..=TIMESTAMP_LEN),
            s.get(TIMESTAMP_LEN + 1..),
        ) {
            (Some(start), Some("-"), Some(end)) => (start, end),
            (Some(_), Some(_), Some(_)) => return Err(RangeError::MissingSeparator),
            // Multi-byte characters straddle the fixed offsets.
            _ => {
                return Err(RangeError::Start(TimestampError::NonDigit { position: 0 }));
            }
        };

        let start: Timestamp = start.parse().map_err(RangeError::Start)?;
        let end: Timestamp = end.parse().map_err(RangeError::End)?;

        if start > end {
            return Err(RangeError::Inverted {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn encodes_zero_padded_fields() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(Timestamp::from_datetime(&dt).to_string(), "20240307090501");
    }

    #[test]
    fn encoding_uses_the_zone_local_fields() {
        let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(Timestamp::from_datetime(&dt).to_string(), "20241231235959");
    }

    #[test]
    fn string_order_matches_chronological_order() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut previous = Timestamp::from_datetime(&base).to_string();

        // Odd step so every field rolls over at some point in the year.
        let mut t = base;
        while t < base + Duration::days(366) {
            t += Duration::seconds(3_607 * 7);
            let current = Timestamp::from_datetime(&t).to_string();
            assert!(previous < current, "{previous} !< {current}");
            previous = current;
        }
    }

    #[test]
    fn parse_and_display_agree() {
        let ts: Timestamp = "20230102030405".parse().unwrap();
        assert_eq!(ts.value(), 20_230_102_030_405);
        assert_eq!(ts.to_string(), "20230102030405");
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            "2023010203040".parse::<Timestamp>(),
            Err(TimestampError::WrongLength { len: 13 })
        );
        assert_eq!(
            "".parse::<Timestamp>(),
            Err(TimestampError::WrongLength { len: 0 })
        );
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert_eq!(
            "2023010203040x".parse::<Timestamp>(),
            Err(TimestampError::NonDigit { position: 13 })
        );
        assert_eq!(
            "+0230102030405".parse::<Timestamp>(),
            Err(TimestampError::NonDigit { position: 0 })
        );
    }

    #[test]
    fn serializes_as_string() {
        let ts: Timestamp = "00010101000000".parse().unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"00010101000000\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn range_parses_and_is_inclusive() {
        let range: TimeRange = "20230101000000-20231231235959".parse().unwrap();
        assert!(range.contains("20230101000000".parse().unwrap()));
        assert!(range.contains("20231231235959".parse().unwrap()));
        assert!(range.contains("20230615120000".parse().unwrap()));
        assert!(!range.contains("20240101000000".parse().unwrap()));
        assert!(!range.contains("20221231235959".parse().unwrap()));
        assert_eq!(range.to_string(), "20230101000000-20231231235959");
    }

    #[test]
    fn range_allows_single_instant() {
        let range: TimeRange = "20230101000000-20230101000000".parse().unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn range_rejects_wrong_length() {
        assert_eq!(
            "20230101000000-2023".parse::<TimeRange>(),
            Err(RangeError::WrongLength { len: 19 })
        );
    }

    #[test]
    fn range_rejects_wrong_separator() {
        assert_eq!(
            "20230101000000_20231231235959".parse::<TimeRange>(),
            Err(RangeError::MissingSeparator)
        );
    }

    #[test]
    fn range_rejects_bad_bounds() {
        assert!(matches!(
            "2023010100000a-20231231235959".parse::<TimeRange>(),
            Err(RangeError::Start(TimestampError::NonDigit { position: 13 }))
        ));
        assert!(matches!(
            "20230101000000-2023123123595 ".parse::<TimeRange>(),
            Err(RangeError::End(_))
        ));
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(matches!(
            "20231231235959-20230101000000".parse::<TimeRange>(),
            Err(RangeError::Inverted { .. })
        ));
    }

    #[test]
    fn range_rejects_multibyte_input_without_panicking() {
        // 29 bytes, but the offsets fall inside a multi-byte character.
        let input = "2023010100000é20231231235959";
        assert_eq!(input.len(), RANGE_LEN);
        assert!(input.parse::<TimeRange>().is_err());
    }

    #[test]
    fn length_is_measured_in_bytes() {
        // 14 characters, 15 bytes.
        let input = "2023010203040é";
        assert_eq!(input.chars().count(), TIMESTAMP_LEN);
        assert_eq!(
            input.parse::<Timestamp>(),
            Err(TimestampError::WrongLength { len: 15 })
        );

        // 29 characters, 30 bytes.
        let input = "20230101000000-2023123123595é";
        assert_eq!(input.chars().count(), RANGE_LEN);
        let err = input.parse::<TimeRange>().unwrap_err();
        assert_eq!(err, RangeError::WrongLength { len: 30 });
        assert!(!err.to_string().contains("got 29"));
    }
}
