//! Default actuator sink.

use async_trait::async_trait;
use serde_json::Value;

use fieldlink_core::command::{AssetScope, Intent};

use super::ActuatorSink;

/// Broker-backed sink placeholder. Without a configured broker endpoint the
/// command is acknowledged as simulated; adapter wiring replaces the body of
/// `dispatch` in a hardware deployment.
pub struct BrokerSink {
    broker_url: Option<String>,
}

impl BrokerSink {
    pub fn new(broker_url: Option<String>) -> Self {
        let broker_url = broker_url.filter(|u| !u.trim().is_empty());
        Self { broker_url }
    }
}

#[async_trait]
impl ActuatorSink for BrokerSink {
    async fn dispatch(&self, scope: &AssetScope, intent: Intent, _payload: &Value) -> String {
        match &self.broker_url {
            None => {
                tracing::info!(%scope, intent = intent.as_str(), "no broker configured, simulating dispatch");
                "simulated".to_string()
            }
            Some(url) => {
                tracing::info!(%scope, intent = intent.as_str(), broker = %url, "dispatching command");
                "sent".to_string()
            }
        }
    }
}
