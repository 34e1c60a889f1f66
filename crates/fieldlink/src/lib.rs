//! Top-level facade crate for FieldLink.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use fieldlink_core::*;
}

pub mod gateway {
    pub use fieldlink_gateway::*;
}
