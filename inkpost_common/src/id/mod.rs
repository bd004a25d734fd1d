//! # Id
//!
//! Record identifiers that sort by the moment they were minted.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use ulid::Ulid;

/// Minting ids per node.
pub mod worker;

/// A 128-bit record id, rendered as 26 characters of Crockford base32.
///
/// Minted ids pack `millis | worker | sequence` from the high bits down, so
/// comparing two ids compares their mint time first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u128);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("`{0}` is not a valid id")]
    Malformed(String),
}

/// The fields packed into a minted [`Id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    pub minted_at: OffsetDateTime,
    pub worker: u16,
    pub sequence: u16,
}

const WORKER_SHIFT: u32 = u16::BITS;
const MILLIS_SHIFT: u32 = 2 * u16::BITS;

impl Id {
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Packs `parts` into an id.
    ///
    /// Times before the Unix epoch clamp to it.
    #[must_use]
    pub fn pack(parts: IdParts) -> Self {
        let millis = (parts.minted_at.unix_timestamp_nanos() / 1_000_000).max(0) as u128;
        Self(
            ((millis & u128::from(u64::MAX)) << MILLIS_SHIFT)
                | (u128::from(parts.worker) << WORKER_SHIFT)
                | u128::from(parts.sequence),
        )
    }

    #[must_use]
    pub fn parts(self) -> IdParts {
        let millis = (self.0 >> MILLIS_SHIFT) as i64;
        IdParts {
            minted_at: OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(millis),
            worker: (self.0 >> WORKER_SHIFT) as u16,
            sequence: self.0 as u16,
        }
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&Ulid::from(self.0), f)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Ulid::from_string(s) {
            Ok(ulid) => Ok(Self(ulid.into())),
            Err(_) => Err(ParseIdError::Malformed(s.into())),
        }
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value.into())
    }
}

impl From<Id> for u128 {
    fn from(id: Id) -> Self {
        id.0
    }
}

#[cfg(feature = "serde")]
const _: () = {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    impl Serialize for Id {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Id {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(de::Error::custom)
        }
    }
};
