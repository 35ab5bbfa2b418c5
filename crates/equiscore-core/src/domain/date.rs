use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of one daily observation, ISO `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Calendar date of a provider epoch timestamp, interpreted in UTC.
    pub fn from_unix_timestamp(seconds: i64) -> Result<Self, ValidationError> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .map(|dt| Self(dt.date()))
            .map_err(|_| ValidationError::TimestampOutOfRange { value: seconds })
    }

    pub fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    /// Midnight UTC at this date as epoch seconds.
    pub fn unix_timestamp(self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp()
    }

    pub fn saturating_sub_days(self, days: i64) -> Self {
        self.0
            .checked_sub(Duration::days(days))
            .map_or(Self(Date::MIN), Self)
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("TradingDate must be ISO formattable")
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let parsed = TradingDate::parse("2024-01-02").expect("must parse");
        assert_eq!(parsed.format_iso(), "2024-01-02");
    }

    #[test]
    fn rejects_malformed_date() {
        let err = TradingDate::parse("02/01/2024").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn converts_epoch_seconds_to_utc_date() {
        // 2024-01-02T14:30:00Z
        let parsed = TradingDate::from_unix_timestamp(1_704_205_800).expect("must convert");
        assert_eq!(parsed.format_iso(), "2024-01-02");
    }

    #[test]
    fn round_trips_unix_timestamp_at_midnight() {
        let date = TradingDate::parse("2024-06-30").expect("must parse");
        let again = TradingDate::from_unix_timestamp(date.unix_timestamp()).expect("must convert");
        assert_eq!(date, again);
    }

    #[test]
    fn subtracts_days() {
        let date = TradingDate::parse("2024-01-10").expect("must parse");
        assert_eq!(date.saturating_sub_days(9).format_iso(), "2024-01-01");
    }
}
