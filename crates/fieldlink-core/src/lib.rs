//! FieldLink core: command data model, safeguard validators, and error surface.
//!
//! This crate defines the types and pure checks every privileged command must
//! pass before dispatch — intent allowlist, asset addressing, payload bounds —
//! plus the error taxonomy shared by the gateway. It intentionally carries no
//! I/O or runtime dependencies so the safeguard logic can be exercised in
//! isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `FieldLinkError`/`Result` so malformed
//! or adversarial input can never crash the gateway.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod command;
pub mod error;
pub mod policy;
pub mod sanitize;

/// Shared result type.
pub use error::{FieldLinkError, Result};
