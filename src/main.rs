use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use wsgw_harness::config::Config;
use wsgw_harness::conntrack::ConnectionTracker;
use wsgw_harness::gateway_client::GatewayClient;
use wsgw_harness::metrics::Metrics;
use wsgw_harness::relay::RelayDispatcher;
use wsgw_harness::state::AppState;
use wsgw_harness::users::UserDirectory;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wsgw_harness=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();
    print_banner(&config);

    let conntrack = Arc::new(ConnectionTracker::new());
    let metrics = Arc::new(Metrics::new());
    let gateway = GatewayClient::new(
        config.gateway_base_url(),
        Duration::from_secs(config.delivery_timeout_secs),
    );
    let relay = Arc::new(RelayDispatcher::new(
        Arc::clone(&conntrack),
        gateway,
        Arc::clone(&metrics),
    ));
    let users = Arc::new(UserDirectory::new(config.credentials.clone()));

    let state = AppState {
        conntrack,
        relay,
        users,
        metrics,
    };

    let app = wsgw_harness::routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    let actual_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app).await.expect("server error");
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36mwsgw-harness\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mport\x1b[0m         {}", config.port);
    eprintln!("  \x1b[2mgateway\x1b[0m      {}", config.gateway_base_url());
    eprintln!("  \x1b[2musers\x1b[0m        {}", config.credentials.len());
    eprintln!(
        "  \x1b[2mtimeout\x1b[0m      {}s per delivery",
        config.delivery_timeout_secs
    );
    eprintln!();
}
