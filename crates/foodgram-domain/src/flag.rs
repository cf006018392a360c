//! `0`/`1` query-string flags (e.g. `?is_favorited=1`).

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// A boolean query flag whose wire format is the digit `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryFlag(pub bool);

/// Error returned when a string is neither `0` nor `1`.
#[derive(Debug, Error)]
#[error("expected 0 or 1, got {0:?}")]
pub struct InvalidFlag(pub String);

impl FromStr for BinaryFlag {
    type Err = InvalidFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self(false)),
            "1" => Ok(Self(true)),
            other => Err(InvalidFlag(other.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for BinaryFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::invalid_value(serde::de::Unexpected::Str(&s), &"0 or 1"))
    }
}
