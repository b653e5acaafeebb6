use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

const FORMAT: &str = "%Y-%m-%d %H:%M";

/// A local wall-clock time with minute precision.
///
/// Stamps are persisted as `YYYY-MM-DD HH:MM`. Seconds are dropped when a
/// stamp is taken so that the in-memory value always equals what is written
/// to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Stamp(NaiveDateTime);

impl Stamp {
    /// The current local time, truncated to the minute.
    #[must_use]
    pub fn now() -> Self {
        Self::truncated(Local::now().naive_local())
    }

    fn truncated(time: NaiveDateTime) -> Self {
        let minute = time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time);
        Self(minute)
    }

    /// The underlying date-time.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Stamp {
    fn from(time: NaiveDateTime) -> Self {
        Self::truncated(time)
    }
}

impl FromStr for Stamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), FORMAT).map(Self)
    }
}

impl TryFrom<String> for Stamp {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Stamp> for String {
    fn from(stamp: Stamp) -> Self {
        stamp.to_string()
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}
