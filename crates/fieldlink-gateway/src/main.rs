//! FieldLink gateway binary.
//!
//! Pipeline per request: rate limit -> identity -> RBAC -> safeguards ->
//! dispatch + audit. Any stage may short-circuit with a terminal decision;
//! only requests passing all stages reach the actuator sink.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use fieldlink_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("fieldlink.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("state build failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "fieldlink-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server failed");
}
