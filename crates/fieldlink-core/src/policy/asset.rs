//! Asset-id validation.
//!
//! Accepts the fleet-wide sentinel `"all"` (case-insensitive, trimmed) or
//! canonical hyphenated UUID text. Anything else is rejected before it can
//! reach storage or actuator layers.

use uuid::Uuid;

use crate::command::AssetScope;
use crate::error::{FieldLinkError, Result};

/// Parse a raw asset-id string into a validated scope.
pub fn parse_asset_scope(raw: &str) -> Result<AssetScope> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(AssetScope::All);
    }
    if !is_canonical_uuid(trimmed) {
        return Err(FieldLinkError::InvalidAssetId);
    }
    let id = Uuid::parse_str(trimmed).map_err(|_| FieldLinkError::InvalidAssetId)?;
    Ok(AssetScope::Asset(id))
}

/// Structural check for canonical 8-4-4-4-12 UUID text: hex digits, hyphens
/// in place, version digit 1-5, RFC 4122 variant nibble. Stricter than
/// `Uuid::parse_str`, which also accepts braced/simple/urn forms.
fn is_canonical_uuid(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 36 {
        return false;
    }
    for (i, &c) in b.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if c != b'-' {
                    return false;
                }
            }
            _ => {
                if !c.is_ascii_hexdigit() {
                    return false;
                }
            }
        }
    }
    // version digit (first of the third group)
    if !(b'1'..=b'5').contains(&b[14]) {
        return false;
    }
    // variant nibble (first of the fourth group)
    matches!(b[19].to_ascii_lowercase(), b'8' | b'9' | b'a' | b'b')
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[test]
    fn all_sentinel_is_case_insensitive() {
        assert_eq!(parse_asset_scope("all").ok(), Some(AssetScope::All));
        assert_eq!(parse_asset_scope(" ALL ").ok(), Some(AssetScope::All));
        assert_eq!(parse_asset_scope("All").ok(), Some(AssetScope::All));
    }

    #[test]
    fn canonical_uuid_accepted() {
        let scope = parse_asset_scope(VALID).ok();
        assert!(matches!(scope, Some(AssetScope::Asset(_))));
        // surrounding whitespace is trimmed
        assert!(parse_asset_scope("  3FA85F64-5717-4562-B3FC-2C963F66AFA6 ").is_ok());
    }

    #[test]
    fn malformed_ids_rejected() {
        for bad in [
            "",
            "alll",
            "not-a-uuid",
            "3fa85f64571745 62b3fc2c963f66afa6",
            "3fa85f6457174562b3fc2c963f66afa6",              // no hyphens
            "{3fa85f64-5717-4562-b3fc-2c963f66afa6}",        // braced form
            "urn:uuid:3fa85f64-5717-4562-b3fc-2c963f66afa6", // urn form
            "3fa85f64-5717-4562-b3fc-2c963f66afa'; DROP TABLE assets;--",
        ] {
            assert!(parse_asset_scope(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn version_and_variant_enforced() {
        // version 0 and nil UUID
        assert!(parse_asset_scope("3fa85f64-5717-0562-b3fc-2c963f66afa6").is_err());
        assert!(parse_asset_scope("00000000-0000-0000-0000-000000000000").is_err());
        // bad variant nibble
        assert!(parse_asset_scope("3fa85f64-5717-4562-73fc-2c963f66afa6").is_err());
    }
}
