//! Safeguard policy engine: pure validators every command passes before
//! dispatch. No I/O, no state.

pub mod asset;
pub mod intent;
pub mod payload;

pub use asset::parse_asset_scope;
pub use intent::{validate_intent, CommandOrigin};
pub use payload::validate_payload;

/// Intents never permitted from the API, regardless of role. Checked against
/// the normalized string before allowlist matching so they stay rejected even
/// if a variant were ever added for one of them.
pub const FORBIDDEN_INTENTS: &[&str] = &["lethal", "weapon", "destroy", "disable_permanent"];

/// Total object-key cap across all payload levels.
pub const MAX_PAYLOAD_KEYS: usize = 32;
/// Payload nesting depth cap (root's children sit at depth 1).
pub const MAX_PAYLOAD_DEPTH: usize = 5;
/// Serialized payload byte cap.
pub const MAX_PAYLOAD_BYTES: usize = 8192;

/// Region-scope claim cap; prevents unbounded claim amplification downstream.
pub const MAX_REGION_IDS: usize = 50;
