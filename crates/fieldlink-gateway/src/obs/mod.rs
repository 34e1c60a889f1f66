//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are stored as atomics behind `DashMap` label sets and rendered
//! by the `/metrics` handler in Prometheus text format.

pub mod metrics;
