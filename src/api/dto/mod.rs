/*
 * Responsibility
 * - JSON response bodies of /api/...
 * - Field names are camelCase on the wire
 */
use chrono::{DateTime, SecondsFormat, Utc};

pub mod protected;
pub mod status;
pub mod test_users;

/// `2024-01-01T00:00:00.000Z`
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
