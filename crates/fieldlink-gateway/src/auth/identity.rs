//! Bearer-credential verification (HS256 JWT).
//!
//! Verification order: structure, signature, then claims. The signature
//! check is constant-time (`Mac::verify_slice`); claim checks only run on a
//! token whose signature already verified, so timing reveals nothing about
//! claim contents.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use fieldlink_core::command::Role;
use fieldlink_core::error::{FieldLinkError, Result};
use fieldlink_core::policy::MAX_REGION_IDS;
use fieldlink_core::sanitize::{sanitize_string, MAX_ISSUED_BY_LEN};

use crate::config::AuthSection;

type HmacSha256 = Hmac<Sha256>;

/// Verified per-request identity. Never persisted; lives for one request.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Sanitized subject, safe for the audit ledger.
    pub subject: String,
    pub role: Role,
    /// Region scope, capped at resolution time. Empty means none;
    /// super admins are not region-scoped.
    pub regions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

/// Claims consumed from the token. Extra claims are ignored.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    role: Option<String>,
    #[serde(default)]
    region_ids: Vec<String>,
    iss: Option<String>,
    aud: Option<String>,
    exp: Option<i64>,
    iat: Option<i64>,
}

/// Resolve the `Authorization` header into an Identity, or fail closed.
pub fn resolve_identity(
    authorization: Option<&str>,
    cfg: &AuthSection,
    now: DateTime<Utc>,
) -> Result<Identity> {
    let header = authorization.ok_or(FieldLinkError::Unauthenticated)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(FieldLinkError::Unauthenticated)?
        .trim();
    if token.is_empty() {
        return Err(FieldLinkError::Unauthenticated);
    }

    if cfg.allow_dev_token && token == "dev-token" {
        tracing::warn!("dev token accepted; auth.allow_dev_token is enabled");
        return Ok(Identity {
            subject: "dev-user".into(),
            role: Role::SuperAdmin,
            regions: vec![],
        });
    }

    let claims = verify_hs256(token, cfg.secret.as_bytes())?;
    check_claims(claims, cfg, now)
}

/// Split, decode, and verify the token signature; returns the raw claims.
fn verify_hs256(token: &str, secret: &[u8]) -> Result<Claims> {
    let mut parts = token.split('.');
    let (Some(h), Some(p), Some(s), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(FieldLinkError::Unauthenticated);
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(h)
        .map_err(|_| FieldLinkError::Unauthenticated)?;
    let header: Header =
        serde_json::from_slice(&header_bytes).map_err(|_| FieldLinkError::Unauthenticated)?;
    if header.alg != "HS256" {
        return Err(FieldLinkError::Unauthenticated);
    }
    if let Some(typ) = &header.typ {
        if typ != "JWT" {
            return Err(FieldLinkError::Unauthenticated);
        }
    }

    let sig = URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|_| FieldLinkError::Unauthenticated)?;
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| FieldLinkError::Unauthenticated)?;
    mac.update(h.as_bytes());
    mac.update(b".");
    mac.update(p.as_bytes());
    mac.verify_slice(&sig)
        .map_err(|_| FieldLinkError::Unauthenticated)?;

    let payload = URL_SAFE_NO_PAD
        .decode(p)
        .map_err(|_| FieldLinkError::Unauthenticated)?;
    serde_json::from_slice(&payload).map_err(|_| FieldLinkError::Unauthenticated)
}

fn check_claims(claims: Claims, cfg: &AuthSection, now: DateTime<Utc>) -> Result<Identity> {
    let now_ts = now.timestamp();

    let exp = claims.exp.ok_or(FieldLinkError::Unauthenticated)?;
    if now_ts > exp + cfg.leeway_secs {
        return Err(FieldLinkError::Unauthenticated);
    }
    if let Some(iat) = claims.iat {
        if iat > now_ts + cfg.leeway_secs {
            return Err(FieldLinkError::Unauthenticated);
        }
    }

    if claims.iss.as_deref() != Some(cfg.issuer.as_str()) {
        return Err(FieldLinkError::Unauthenticated);
    }
    if claims.aud.as_deref() != Some(cfg.audience.as_str()) {
        return Err(FieldLinkError::Unauthenticated);
    }

    let subject = sanitize_string(
        claims.sub.as_deref().unwrap_or_default(),
        MAX_ISSUED_BY_LEN,
    );
    if subject.is_empty() {
        return Err(FieldLinkError::Unauthenticated);
    }

    let role = claims
        .role
        .as_deref()
        .and_then(Role::parse)
        .ok_or(FieldLinkError::Unauthenticated)?;

    let mut regions = claims.region_ids;
    regions.truncate(MAX_REGION_IDS);

    Ok(Identity {
        subject,
        role,
        regions,
    })
}
