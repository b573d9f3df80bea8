//! Serde helpers for custom serialization.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Serialization and deserialization for `Option<SystemTime>` as an RFC 3339
/// timestamp, the format `ccpctl` files have always carried.
///
/// Reading also accepts whole seconds since the UNIX epoch. Timestamps before
/// the epoch, such as the zero time `0001-01-01T00:00:00Z`, read as `None`.
pub mod optional_system_time {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stamp {
        Seconds(u64),
        Text(String),
    }

    /// Serialize a `SystemTime` as an RFC 3339 string in UTC, or `null`.
    pub fn serialize<S>(time: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => {
                let text = DateTime::<Utc>::from(*time).to_rfc3339_opts(SecondsFormat::AutoSi, true);
                serializer.serialize_some(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an RFC 3339 string or epoch seconds into a `SystemTime`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SystemTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Stamp>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Stamp::Seconds(secs)) => Ok(Some(UNIX_EPOCH + Duration::from_secs(secs))),
            Some(Stamp::Text(text)) => {
                let parsed = DateTime::parse_from_rfc3339(&text).map_err(|e| {
                    serde::de::Error::custom(format!("invalid timestamp '{text}': {e}"))
                })?;
                if parsed.timestamp() < 0 {
                    return Ok(None);
                }
                Ok(Some(SystemTime::from(parsed.with_timezone(&Utc))))
            }
        }
    }
}
