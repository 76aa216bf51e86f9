use chrono::Utc;

use super::types::ReturnType;

/// Generate a human-readable return number for the given type.
///
/// Format: `SR-<6 digits>` for sale returns, `DN-<6 digits>` for purchase
/// returns, where the digits are the last 6 of the current Unix millisecond
/// timestamp. Uniqueness is per-session, good enough for a draft number —
/// the remote service assigns the durable identifier on persistence.
pub fn generate_return_number(return_type: ReturnType) -> String {
    generate_return_number_at(return_type, Utc::now().timestamp_millis())
}

/// Deterministic variant taking an explicit millisecond timestamp.
pub fn generate_return_number_at(return_type: ReturnType, timestamp_millis: i64) -> String {
    let suffix = timestamp_millis.rem_euclid(1_000_000);
    format!("{}{:06}", return_type.number_prefix(), suffix)
}
