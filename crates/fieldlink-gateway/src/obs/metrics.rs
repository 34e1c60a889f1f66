//! Minimal metrics registry for the gateway.
//!
//! Counter vectors with dynamic labels backed by `DashMap`. Labels are
//! flattened into sorted key vectors to keep deterministic ordering.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();

        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Sum across all label sets (used by tests and readiness checks).
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let label_str = r
                .key()
                .iter()
                .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{name}{{{label_str}}} {}", r.value().load(Ordering::Relaxed));
        }
    }
}

/// Counters for every pipeline stage that can terminate a request.
#[derive(Default)]
pub struct GatewayMetrics {
    /// Credential failures (label: route).
    pub auth_failures: CounterVec,
    /// Rate-limit rejections (label: class).
    pub rate_limited: CounterVec,
    /// Safeguard/RBAC rejections (label: code).
    pub rejections: CounterVec,
    /// Dispatched commands (labels: intent, result).
    pub dispatched: CounterVec,
    /// Fatal audit-write failures.
    pub audit_failures: CounterVec,
}

impl GatewayMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.auth_failures.render("fieldlink_auth_failures_total", &mut out);
        self.rate_limited.render("fieldlink_rate_limited_total", &mut out);
        self.rejections.render("fieldlink_rejections_total", &mut out);
        self.dispatched.render("fieldlink_commands_dispatched_total", &mut out);
        self.audit_failures.render("fieldlink_audit_write_failures_total", &mut out);
        out
    }
}
