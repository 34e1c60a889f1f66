//! FieldLink gateway library entry.
//!
//! This crate wires the identity resolver, rate limiter, RBAC gate,
//! safeguard policy engine, and the command ledger into a cohesive
//! authorization pipeline. It is intended to be consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ratelimit;
pub mod router;
pub mod routes;
