//! In-memory audit store.
//!
//! Stands in for the external append-only ledger (e.g. a Postgres
//! `audit.command_log` table) behind the same trait. A production
//! deployment substitutes a durable store; this core never issues updates
//! or deletes either way.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use fieldlink_core::command::AuditRecord;
use fieldlink_core::error::{FieldLinkError, Result};

use super::AuditStore;

#[derive(Default)]
pub struct MemoryAuditStore {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, record: AuditRecord) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| FieldLinkError::AuditWriteFailed("audit store poisoned".into()))?;
        records.push(record);
        Ok(())
    }

    async fn recent(&self, asset_id: Option<Uuid>, limit: usize) -> Result<Vec<AuditRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| FieldLinkError::Internal("audit store poisoned".into()))?;
        Ok(records
            .iter()
            .rev()
            .filter(|r| asset_id.is_none() || r.asset_id == asset_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
