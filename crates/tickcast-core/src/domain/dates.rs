use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset, Weekday};

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of one trading session.
///
/// The julian day number doubles as the ordinal regression feature for the
/// trend model, so equality of dates implies equality of features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    /// Date of the given unix timestamp, read in UTC.
    pub fn from_unix_timestamp(secs: i64) -> Result<Self, ValidationError> {
        let ts = OffsetDateTime::from_unix_timestamp(secs).map_err(|_| {
            ValidationError::InvalidTimestamp {
                value: secs.to_string(),
            }
        })?;
        Ok(Self(ts.date()))
    }

    /// Integer day count used as the single regression feature.
    pub fn ordinal(self) -> i64 {
        i64::from(self.0.to_julian_day())
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// The next calendar day. Saturates at the calendar limit.
    pub fn succ(self) -> Self {
        Self(self.0.next_day().unwrap_or(self.0))
    }

    /// The next trading session: the following day, rolled past weekends
    /// (Saturday skips two days, Sunday one). No holiday calendar.
    pub fn next_trading_day(self) -> Self {
        let next = self.succ();
        match next.weekday() {
            Weekday::Saturday => next.succ().succ(),
            Weekday::Sunday => next.succ(),
            _ => next,
        }
    }

    pub fn into_inner(self) -> Date {
        self.0
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = self
            .0
            .format(DATE_FORMAT)
            .unwrap_or_else(|_| String::from("<unformattable>"));
        f.write_str(&formatted)
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Timestamp normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parse an RFC3339 timestamp, normalizing any offset to UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        OffsetDateTime::parse(input, &Rfc3339)
            .map(|parsed| Self(parsed.to_offset(UtcOffset::UTC)))
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    /// Parse an RFC2822 timestamp as used by RSS `pubDate` elements.
    ///
    /// Feeds commonly use the obsolete `GMT` zone token; it is normalized to
    /// a numeric offset before parsing.
    pub fn parse_rfc2822(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        OffsetDateTime::parse(trimmed, &Rfc2822)
            .or_else(|_| {
                let normalized = trimmed.replace(" GMT", " +0000");
                OffsetDateTime::parse(&normalized, &Rfc2822)
            })
            .map(|parsed| Self(parsed.to_offset(UtcOffset::UTC)))
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    pub fn date(self) -> TradingDate {
        TradingDate::new(self.0.date())
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
