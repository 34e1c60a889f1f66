//! Shared application state for the FieldLink gateway.
//!
//! Wires the rate-limit store, the command ledger (sink + audit), and the
//! metrics registry behind one cheaply-clonable handle. Collaborators are
//! trait objects so tests inject stubs through `with_parts`.

use std::sync::Arc;
use std::time::Duration;

use fieldlink_core::error::Result;

use crate::config::GatewayConfig;
use crate::dispatch::{ActuatorSink, AuditStore, BrokerSink, CommandLedger, MemoryAuditStore};
use crate::obs::metrics::GatewayMetrics;
use crate::ratelimit::{FixedWindowStore, RateLimitStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    limiter: Arc<dyn RateLimitStore>,
    audit: Arc<dyn AuditStore>,
    ledger: CommandLedger,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Build application state with the default collaborators.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let sink: Arc<dyn ActuatorSink> = Arc::new(BrokerSink::new(cfg.sink.broker_url.clone()));
        let audit: Arc<dyn AuditStore> = Arc::new(MemoryAuditStore::new());
        let limiter: Arc<dyn RateLimitStore> = Arc::new(FixedWindowStore::new(&cfg.rate_limit));
        Ok(Self::with_parts(cfg, sink, audit, limiter))
    }

    /// Assemble state from explicit collaborators (tests, alternate sinks).
    pub fn with_parts(
        cfg: GatewayConfig,
        sink: Arc<dyn ActuatorSink>,
        audit: Arc<dyn AuditStore>,
        limiter: Arc<dyn RateLimitStore>,
    ) -> Self {
        let ledger = CommandLedger::new(
            sink,
            Arc::clone(&audit),
            Duration::from_millis(cfg.gateway.sink_timeout_ms),
            Duration::from_millis(cfg.gateway.audit_timeout_ms),
        );
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                limiter,
                audit,
                ledger,
                metrics: GatewayMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn limiter(&self) -> &dyn RateLimitStore {
        self.inner.limiter.as_ref()
    }

    pub fn audit(&self) -> &dyn AuditStore {
        self.inner.audit.as_ref()
    }

    pub fn ledger(&self) -> &CommandLedger {
        &self.inner.ledger
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }
}
