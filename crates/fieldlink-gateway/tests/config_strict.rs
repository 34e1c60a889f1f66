#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fieldlink_gateway::config;

const SECRET_LINE: &str = "secret: \"0123456789abcdef0123456789abcdef\"";

#[test]
fn deny_unknown_fields_nested() {
    let bad = format!(
        r#"
version: 1
auth:
  {SECRET_LINE}
rate_limit:
  window_secs: 60
  general_maxx: 120 # typo should fail
"#
    );

    let err = config::load_from_str(&bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = format!(
        r#"
version: 1
auth:
  {SECRET_LINE}
"#
    );
    let cfg = config::load_from_str(&ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.rate_limit.general_max, 120);
    assert_eq!(cfg.rate_limit.auth_max, 10);
    assert!(!cfg.auth.allow_dev_token);
    assert!(cfg.sink.broker_url.is_none());
}

#[test]
fn short_secret_rejected() {
    let bad = r#"
version: 1
auth:
  secret: "too-short"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn sink_timeout_must_stay_below_request_timeout() {
    let bad = format!(
        r#"
version: 1
gateway:
  request_timeout_ms: 5000
  sink_timeout_ms: 5000
auth:
  {SECRET_LINE}
"#
    );
    assert!(config::load_from_str(&bad).is_err());
}

#[test]
fn auth_tier_must_not_exceed_general() {
    let bad = format!(
        r#"
version: 1
auth:
  {SECRET_LINE}
rate_limit:
  general_max: 10
  auth_max: 20
"#
    );
    assert!(config::load_from_str(&bad).is_err());
}
