// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, SubsecRound};

/// Current local time with the UTC offset kept, truncated to milliseconds.
///
/// Persisted timestamps only carry millisecond precision, so anything
/// finer would not survive a save/load cycle.
pub fn now_local_millis() -> DateTime<FixedOffset> {
    Local::now().fixed_offset().trunc_subsecs(3)
}

/// Format a timestamp as RFC3339 with millisecond precision.
///
/// A zero offset is written with a `Z` suffix.
pub fn format_rfc3339_millis(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter storing timestamps via [`format_rfc3339_millis`].
pub mod rfc3339_millis {
    use chrono::{DateTime, FixedOffset};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_rfc3339_millis(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw).map_err(de::Error::custom)
    }
}
