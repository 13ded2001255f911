//! Score entity and command payloads.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::identity::UserId;

/// Stable numeric score identifier assigned by the store on insert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ScoreId(i64);

impl ScoreId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ScoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One persisted score entry.
///
/// ## Invariants
/// - `user_id` referenced an existing directory user at the time of the last
///   write. The reference is not re-validated afterwards.
/// - `id` is assigned once by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    id: ScoreId,
    user_id: UserId,
    value: i64,
    recorded_at: DateTime<Utc>,
}

impl Score {
    /// Rehydrate a persisted score. Only stores construct these.
    pub fn new(id: ScoreId, user_id: UserId, value: i64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            value,
            recorded_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> ScoreId {
        self.id
    }

    /// Owner of the score.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Recorded numeric value. No range constraint applies.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Moment the score was achieved.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Replace the owner reference. Callers validate the reference first.
    pub fn set_user_id(&mut self, user_id: UserId) {
        self.user_id = user_id;
    }

    /// Replace the stored value.
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    /// Replace the recorded timestamp.
    pub fn set_recorded_at(&mut self, recorded_at: DateTime<Utc>) {
        self.recorded_at = recorded_at;
    }
}

/// Fields of a score about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    /// Owner reference, validated against the directory before insert.
    pub user_id: UserId,
    /// Score value.
    pub value: i64,
    /// Moment the score was achieved.
    pub recorded_at: DateTime<Utc>,
}

/// Loosely-typed command payload for create and update operations.
///
/// Fields are optional so the command service can distinguish "absent" from
/// "present" and report missing required fields itself, after the
/// authorization checks have run. The timestamp stays raw until the
/// validation phase because an unparsable value must not short-circuit the
/// earlier authorization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorePayload {
    /// Score value, if present in the request body.
    pub value: Option<i64>,
    /// Owner reference, if present in the request body.
    pub user_id: Option<UserId>,
    /// Raw timestamp, if present in the request body.
    pub recorded_at: Option<String>,
}

/// Error raised when a raw timestamp does not match any accepted format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("timestamp must be RFC 3339, `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DD`")]
pub struct RecordedAtParseError;

/// Parse a raw `recordedAt` value.
///
/// Accepts RFC 3339, a space-separated date-time, or a plain date (midnight
/// UTC). Naive inputs are interpreted as UTC.
///
/// # Examples
/// ```
/// use backend::domain::score::parse_recorded_at;
///
/// let parsed = parse_recorded_at("2024-01-01").expect("plain dates are accepted");
/// assert_eq!(parsed.to_rfc3339(), "2024-01-01T00:00:00+00:00");
/// ```
pub fn parse_recorded_at(raw: &str) -> Result<DateTime<Utc>, RecordedAtParseError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(parsed
            .and_hms_opt(0, 0, 0)
            .ok_or(RecordedAtParseError)?
            .and_utc());
    }
    Err(RecordedAtParseError)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-01T10:30:00+01:00", "2024-01-01T09:30:00+00:00")]
    #[case("2024-01-01 10:30:00", "2024-01-01T10:30:00+00:00")]
    #[case("2024-01-01", "2024-01-01T00:00:00+00:00")]
    fn recorded_at_accepts_known_formats(#[case] raw: &str, #[case] expected: &str) {
        let parsed = parse_recorded_at(raw).expect("accepted format");
        assert_eq!(parsed.to_rfc3339(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("01/02/2024")]
    fn recorded_at_rejects_unknown_formats(#[case] raw: &str) {
        assert_eq!(parse_recorded_at(raw), Err(RecordedAtParseError));
    }

    #[test]
    fn setters_mutate_in_place() {
        let recorded_at = parse_recorded_at("2024-01-01").expect("valid date");
        let mut score = Score::new(ScoreId::new(5), UserId::new(1), 42, recorded_at);

        score.set_value(99);
        score.set_user_id(UserId::new(2));
        let later = parse_recorded_at("2024-06-01").expect("valid date");
        score.set_recorded_at(later);

        assert_eq!(score.id(), ScoreId::new(5));
        assert_eq!(score.value(), 99);
        assert_eq!(score.user_id(), UserId::new(2));
        assert_eq!(score.recorded_at(), later);
    }
}
