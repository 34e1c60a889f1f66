//! Command dispatch and the append-only audit ledger.
//!
//! `CommandLedger` is the only component that hands a command to the
//! actuator sink and the only one that writes audit records. Both
//! collaborators sit behind traits so tests (and production adapters) can
//! be swapped in without touching the pipeline contract.

pub mod audit;
pub mod ledger;
pub mod sink;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use fieldlink_core::command::{AssetScope, AuditRecord, Intent};
use fieldlink_core::error::Result;

/// External actuation boundary (MQTT/ROS adapter, simulator, ...).
///
/// Infallible by contract: the sink is unreliable, so failures come back as
/// marker strings in the outcome, never as errors thrown into the pipeline.
#[async_trait]
pub trait ActuatorSink: Send + Sync {
    async fn dispatch(&self, scope: &AssetScope, intent: Intent, payload: &Value) -> String;
}

/// Append-only audit storage. No update or delete surface exists.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Atomically append one record.
    async fn append(&self, record: AuditRecord) -> Result<()>;

    /// Most recent records, newest first, optionally filtered by asset.
    async fn recent(&self, asset_id: Option<Uuid>, limit: usize) -> Result<Vec<AuditRecord>>;
}

pub use audit::MemoryAuditStore;
pub use ledger::CommandLedger;
pub use sink::BrokerSink;
