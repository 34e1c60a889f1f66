use serde::Deserialize;

use fieldlink_core::error::{FieldLinkError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    pub auth: AuthSection,

    #[serde(default)]
    pub rate_limit: RateLimitSection,

    #[serde(default)]
    pub sink: SinkSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FieldLinkError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.gateway.validate()?;
        self.auth.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Ambient per-request budget; sink and audit timeouts must stay below it.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_sink_timeout_ms")]
    pub sink_timeout_ms: u64,

    #[serde(default = "default_audit_timeout_ms")]
    pub audit_timeout_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            request_timeout_ms: default_request_timeout_ms(),
            sink_timeout_ms: default_sink_timeout_ms(),
            audit_timeout_ms: default_audit_timeout_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !(1000..=120_000).contains(&self.request_timeout_ms) {
            return Err(FieldLinkError::BadRequest(
                "gateway.request_timeout_ms must be between 1000 and 120000".into(),
            ));
        }
        if self.sink_timeout_ms == 0 || self.sink_timeout_ms >= self.request_timeout_ms {
            return Err(FieldLinkError::BadRequest(
                "gateway.sink_timeout_ms must be nonzero and below request_timeout_ms".into(),
            ));
        }
        if self.audit_timeout_ms == 0 || self.audit_timeout_ms >= self.request_timeout_ms {
            return Err(FieldLinkError::BadRequest(
                "gateway.audit_timeout_ms must be nonzero and below request_timeout_ms".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_request_timeout_ms() -> u64 {
    10_000
}
fn default_sink_timeout_ms() -> u64 {
    2_000
}
fn default_audit_timeout_ms() -> u64 {
    2_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// HS256 signing secret shared with the token issuer.
    pub secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: i64,

    /// Dev-only escape hatch: accept the literal `dev-token` as a fixed
    /// super-admin identity. Never enable outside local development.
    #[serde(default)]
    pub allow_dev_token: bool,
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        if self.secret.len() < 32 {
            return Err(FieldLinkError::BadRequest(
                "auth.secret must be at least 32 bytes".into(),
            ));
        }
        if !(0..=60).contains(&self.leeway_secs) {
            return Err(FieldLinkError::BadRequest(
                "auth.leeway_secs must be between 0 and 60".into(),
            ));
        }
        if self.allow_dev_token {
            tracing::warn!("auth.allow_dev_token is enabled; dev-only escape hatch active");
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "fieldlink-api".into()
}
fn default_audience() -> String {
    "fieldlink-dashboard".into()
}
fn default_leeway_secs() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitSection {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    #[serde(default = "default_general_max")]
    pub general_max: u32,

    /// Stricter tier for authentication-adjacent routes.
    #[serde(default = "default_auth_max")]
    pub auth_max: u32,
}

impl Default for RateLimitSection {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            general_max: default_general_max(),
            auth_max: default_auth_max(),
        }
    }
}

impl RateLimitSection {
    pub fn validate(&self) -> Result<()> {
        if self.window_secs == 0 {
            return Err(FieldLinkError::BadRequest(
                "rate_limit.window_secs must be nonzero".into(),
            ));
        }
        if self.general_max == 0 || self.auth_max == 0 {
            return Err(FieldLinkError::BadRequest(
                "rate_limit limits must be nonzero".into(),
            ));
        }
        if self.auth_max > self.general_max {
            return Err(FieldLinkError::BadRequest(
                "rate_limit.auth_max must not exceed general_max".into(),
            ));
        }
        Ok(())
    }
}

fn default_window_secs() -> u64 {
    60
}
fn default_general_max() -> u32 {
    120
}
fn default_auth_max() -> u32 {
    10
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SinkSection {
    /// Actuator broker endpoint. Absent means commands are simulated.
    #[serde(default)]
    pub broker_url: Option<String>,
}
