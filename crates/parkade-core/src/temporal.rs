//! # Arrival and Departure Instants
//!
//! `Timestamp` is the instant recorded at check-in and check-out. It is
//! always UTC and keeps the full precision of the clock or the input text.
//! Sub-second differences matter: a departure half a second before arrival
//! is a reversed range, and half a second past a full hour starts a new one.
//!
//! Offsets other than `Z` are rejected when parsing, so `departure >= arrival`
//! is a plain `Ord` comparison.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParkadeError;

/// A UTC instant with nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current wall-clock instant.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap a `chrono::DateTime<Utc>` as is.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse an RFC 3339 instant ending in `Z`, fractional seconds allowed.
    ///
    /// # Errors
    ///
    /// [`ParkadeError::Parse`] if the text is not RFC 3339 or carries an
    /// explicit offset (even `+00:00`).
    pub fn parse(s: &str) -> Result<Self, ParkadeError> {
        if !s.ends_with('Z') {
            return Err(ParkadeError::Parse(format!(
                "timestamp must be UTC with a Z suffix, got {s:?}"
            )));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| ParkadeError::Parse(format!("invalid RFC 3339 timestamp {s:?}: {e}")))
    }

    /// The inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Shift by `delta`, or `None` if the result is out of range.
    pub fn checked_add(&self, delta: Duration) -> Option<Self> {
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Signed distance from `earlier` to `self`; negative when `earlier`
    /// is actually later.
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// RFC 3339 with a `Z` suffix. Fractional digits appear only when the
    /// instant has a sub-second part (`06:05:00Z`, `06:05:00.500Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}
