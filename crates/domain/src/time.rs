//! Timestamps stamped on stored device records.

use chrono::{DateTime, Utc};

/// UTC instant, serialized as RFC 3339.
pub type Timestamp = DateTime<Utc>;

#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
