//! Helpers for filling optional payload fields.
//!
//! Payload models mark fields the caller may leave out as `Option<T>` with
//! `skip_serializing_if = "Option::is_none"`. These helpers keep struct
//! literals short:
//!
//! ```
//! use ghost_admin_core::opt;
//!
//! #[derive(serde::Serialize)]
//! struct PostUpdate {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     title: Option<String>,
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     featured: Option<bool>,
//! }
//!
//! let update = PostUpdate { title: opt::string("Hello"), featured: opt::boolean(true) };
//! assert_eq!(update.title.as_deref(), Some("Hello"));
//! ```

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Wraps a copy of the string.
#[must_use]
pub fn string(s: impl Into<String>) -> Option<String> {
    Some(s.into())
}

/// Wraps the boolean.
#[must_use]
pub const fn boolean(b: bool) -> Option<bool> {
    Some(b)
}

/// Wraps the integer.
#[must_use]
pub const fn int(i: i64) -> Option<i64> {
    Some(i)
}

/// The timestamp [`time`] falls back to: the Unix epoch, `DateTime::<Utc>::default()`.
#[must_use]
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// Parses an RFC 3339 timestamp.
///
/// Malformed text does not fail: it yields `Some(zero_time())`. Kept for
/// callers that only feed it server-issued timestamps; use [`try_time`] for
/// anything user supplied.
#[must_use]
pub fn time(s: &str) -> Option<DateTime<Utc>> {
    Some(try_time(s).ok().flatten().unwrap_or_else(zero_time))
}

/// Parses an RFC 3339 timestamp, reporting malformed text.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `s` is not RFC 3339.
pub fn try_time(s: &str) -> Result<Option<DateTime<Utc>>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|e| Error::invalid_argument(format!("invalid RFC 3339 timestamp {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn scalar_helpers_wrap_values() {
        check!(string("draft") == Some("draft".to_string()));
        check!(boolean(false) == Some(false));
        check!(int(-3) == Some(-3));
    }

    #[test]
    fn time_parses_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2019, 1, 2, 3, 4, 5).single();
        check!(time("2019-01-02T03:04:05Z") == expected);
        check!(time("2019-01-02T05:04:05+02:00") == expected);
    }

    #[test]
    fn time_defaults_on_malformed_text() {
        check!(time("not-a-date") == Some(zero_time()));
        check!(time("") == Some(zero_time()));
        check!(zero_time().timestamp() == 0);
    }

    #[test]
    fn try_time_reports_malformed_text() {
        let_assert!(Err(err) = try_time("not-a-date"));
        check!(err.is_invalid_argument());
        check!(err.to_string().contains("not-a-date"));
    }
}
