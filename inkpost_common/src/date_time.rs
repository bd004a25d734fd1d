use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

/// An instant pinned to UTC, stored on every record as its creation time.
///
/// Orders like the instant itself and travels as RFC 3339 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtcDateTimeError {
    #[error("timestamp {0} is out of range")]
    OutOfRange(i128),
    #[error("`{0}` is not an RFC 3339 date time")]
    InvalidFormat(String),
}

impl UtcDateTime {
    pub const UNIX_EPOCH: Self = Self(OffsetDateTime::UNIX_EPOCH);

    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn from_seconds(seconds: i64) -> Result<Self, UtcDateTimeError> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .map(Self)
            .map_err(|_| UtcDateTimeError::OutOfRange(seconds.into()))
    }

    pub fn from_milliseconds(milliseconds: i64) -> Result<Self, UtcDateTimeError> {
        let nanos = i128::from(milliseconds) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map(Self)
            .map_err(|_| UtcDateTimeError::OutOfRange(nanos))
    }

    /// Whole seconds and the sub-second nanoseconds since the Unix epoch.
    pub fn timestamp(self) -> (i64, u32) {
        (self.0.unix_timestamp(), self.0.nanosecond())
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for UtcDateTime {
    type Err = UtcDateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, &Rfc3339)
            .map(Self::from)
            .map_err(|_| UtcDateTimeError::InvalidFormat(s.into()))
    }
}

impl From<OffsetDateTime> for UtcDateTime {
    fn from(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }
}

impl From<UtcDateTime> for OffsetDateTime {
    fn from(value: UtcDateTime) -> Self {
        value.0
    }
}

#[cfg(feature = "serde")]
const _: () = {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    impl Serialize for UtcDateTime {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for UtcDateTime {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(de::Error::custom)
        }
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let dt = UtcDateTime::from_seconds(10).unwrap();
        assert_eq!(dt.to_string(), "1970-01-01T00:00:10Z");
        assert_eq!(dt.timestamp(), (10, 0));
        assert_eq!("1970-01-01T00:00:10Z".parse::<UtcDateTime>(), Ok(dt));
        assert_eq!(
            "1970-01-01T02:00:10+02:00".parse::<UtcDateTime>(),
            Ok(dt)
        );
        assert_eq!(
            "yesterday".parse::<UtcDateTime>(),
            Err(UtcDateTimeError::InvalidFormat("yesterday".into()))
        );
        assert!(UtcDateTime::from_seconds(i64::MAX).is_err());
    }

    #[test]
    fn milliseconds() {
        let dt = UtcDateTime::from_milliseconds(1_500).unwrap();
        assert_eq!(dt.timestamp(), (1, 500_000_000));
        assert!(UtcDateTime::UNIX_EPOCH < dt);
        assert_eq!(
            UtcDateTime::from_milliseconds(-1).unwrap().timestamp(),
            (-1, 999_000_000)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize() {
        let dt = UtcDateTime::UNIX_EPOCH;
        let js = serde_json::to_string(&dt).unwrap();
        assert_eq!(js, r#""1970-01-01T00:00:00Z""#);
        assert_eq!(serde_json::from_str::<UtcDateTime>(&js).unwrap(), dt);
    }
}
