//! Identity resolution and role gating.
//!
//! Resolution is fail-closed: any missing, malformed, expired, or
//! mis-addressed credential collapses to `Unauthenticated` with no detail
//! about which check failed. Role gating runs strictly after authentication
//! so callers can distinguish "who are you" (401) from "you may not do
//! this" (403).

pub mod identity;
pub mod rbac;

pub use identity::{resolve_identity, Identity};
pub use rbac::require_role;
