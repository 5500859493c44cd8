use clinigate::{config, routes, state};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = config::Config::from_env();
    if config.exchange.is_none() {
        tracing::warn!("AUTH_EXCHANGE_URL/AUTH_REDIRECT_URL not set — login disabled");
    }
    if config.dev_auth_bypass {
        tracing::warn!("DEV_AUTH_BYPASS enabled — route protection is off");
    }

    let state = state::AppState::new(config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "clinigate listening");
    axum::serve(listener, app).await.expect("server failed");
}
