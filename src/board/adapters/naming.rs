//! Stored-name generation shared by attachment store adapters.

use chrono::{DateTime, Utc};

/// Builds the stored name for an upload.
///
/// The first attempt is `<unix-millis>_<base>`; later attempts insert a
/// counter so a colliding name is never reused.
#[must_use]
pub fn stored_file_name(timestamp: DateTime<Utc>, base: &str, attempt: u32) -> String {
    let millis = timestamp.timestamp_millis();
    if attempt == 0 {
        format!("{millis}_{base}")
    } else {
        format!("{millis}-{attempt}_{base}")
    }
}
