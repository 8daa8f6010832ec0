use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use runrecap::config::AppConfig;
use runrecap::orchestrator::Orchestrator;
use runrecap::strava::StravaClient;
use runrecap::summarizer::OpenAiClient;
use runrecap::tokens::TokenStore;
use runrecap::{AppState, build_app};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runrecap=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("configuration should be complete");
    let store = TokenStore::open(&config.token_db_path).expect("token store should open");

    let platform = StravaClient::new(config.client_id.clone(), config.client_secret.clone());
    let summarizer = OpenAiClient::new(config.openai_api_key.clone());
    let auth_url = platform.authorize_url(&config.redirect_uri);

    let state = AppState {
        orchestrator: Arc::new(Orchestrator::new(
            platform,
            summarizer,
            store,
            config.athlete_id,
        )),
        config: Arc::new(config.clone()),
        auth_url,
    };

    let app = build_app(state);
    let addr: SocketAddr = config.bind_addr.parse().expect("valid socket address");
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server crashed");
}
