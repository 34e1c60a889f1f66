//! Input sanitization for strings that end up in the audit ledger.

/// Max length for general string inputs.
pub const MAX_STRING_LEN: usize = 2048;
/// Max length for the `issued_by` audit field.
pub const MAX_ISSUED_BY_LEN: usize = 256;

/// Return a safe string: trimmed, control characters removed, truncated.
pub fn sanitize_string(raw: &str, max_len: usize) -> String {
    raw.trim()
        .chars()
        .filter(|&c| c as u32 >= 0x20 && c as u32 != 0x7f)
        .take(max_len)
        .collect()
}

/// Sanitize an issuer string for the audit log: no injection, bounded
/// length, never empty.
pub fn sanitize_issued_by(raw: Option<&str>) -> String {
    let s = sanitize_string(raw.unwrap_or_default(), MAX_ISSUED_BY_LEN);
    if s.is_empty() {
        "unknown".to_string()
    } else {
        s
    }
}
