use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter, Write},
};

use inkpost_common::date_time::UtcDateTime;

use crate::schema::ValueType;

/// Value of an entity member, as seen by filters and orderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
    /// String value.
    String(String),
    /// Timestamp value.
    Timestamp(UtcDateTime),
}

impl Value {
    /// Gets the value type.
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Boolean(_) => ValueType::Boolean,
            Self::String(_) => ValueType::String,
            Self::Timestamp(_) => ValueType::Timestamp,
        }
    }

    /// Case-insensitive substring match. Non-string values never match.
    pub fn contains_insensitive(&self, needle: &str) -> bool {
        match self {
            Self::String(value) => value.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        }
    }
}

/// Compares strings case-insensitively, breaking ties so that lowercase sorts
/// before uppercase at the first differing character (`test < Test < TEST`).
pub fn collate(lhs: &str, rhs: &str) -> Ordering {
    let folded = lhs
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(rhs.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        for (a, b) in lhs.chars().zip(rhs.chars()) {
            if a != b {
                return match (a.is_lowercase(), b.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => a.cmp(&b),
                };
            }
        }
        lhs.cmp(rhs)
    })
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => value.fmt(f),
            Self::Boolean(value) => value.fmt(f),
            Self::String(value) => {
                f.write_char('"')?;
                value.fmt(f)?;
                f.write_char('"')
            }
            Self::Timestamp(value) => {
                f.write_char('"')?;
                value.fmt(f)?;
                f.write_char('"')
            }
        }
    }
}

impl PartialOrd<Self> for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(lhs), Self::Integer(rhs)) => lhs.partial_cmp(rhs),
            (Self::Boolean(lhs), Self::Boolean(rhs)) => lhs.partial_cmp(rhs),
            (Self::String(lhs), Self::String(rhs)) => Some(collate(lhs, rhs)),
            (Self::Timestamp(lhs), Self::Timestamp(rhs)) => lhs.partial_cmp(rhs),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<UtcDateTime> for Value {
    fn from(value: UtcDateTime) -> Self {
        Self::Timestamp(value)
    }
}
