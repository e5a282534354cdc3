//! # Temporal Types: UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only instant used for bill dates and the
//! evaluation clock.
//!
//! Upstream extractors deliver bill dates as epoch milliseconds (inside an
//! extended-JSON `$date` envelope) or, less often, as RFC 3339 strings.
//! Both convert here. Rendering for violation messages uses the calendar
//! date only (`YYYY-MM-DD`).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SpendpolError;

/// A UTC instant.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`.
/// - [`Timestamp::from_epoch_millis()`]: from Unix epoch milliseconds.
/// - [`Timestamp::parse_lenient()`]: from RFC 3339 with any offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap a `chrono::DateTime<Utc>`.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Create a timestamp from Unix epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`SpendpolError::InvalidTimestamp`] when the value lies
    /// outside the range `chrono` can represent.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, SpendpolError> {
        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or_else(|| {
                SpendpolError::InvalidTimestamp(format!("epoch milliseconds out of range: {millis}"))
            })
    }

    /// Parse an RFC 3339 string, accepting any offset and converting to UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, SpendpolError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            SpendpolError::InvalidTimestamp(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Unix epoch milliseconds.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Calendar date in `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Render as ISO8601 with Z suffix, seconds precision.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Time elapsed from `earlier` to `self`. Negative when `earlier` is in
    /// the future relative to `self`.
    pub fn since(&self, earlier: &Timestamp) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// This instant shifted back by `span`, saturating at the earliest
    /// representable instant.
    pub fn minus(&self, span: Duration) -> Self {
        Self(self.0.checked_sub_signed(span).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}
