use chrono::Utc;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub fn generate_access_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Prefix for stored file names: millisecond timestamp plus a random suffix.
/// Contains no `-`, so the original name can be recovered after the first one.
pub fn upload_token() -> String {
    format!(
        "{}{}",
        Utc::now().timestamp_millis(),
        generate_access_token(8).to_lowercase()
    )
}
