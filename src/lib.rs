pub mod analysis;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod strava;
pub mod summarizer;
pub mod tokens;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use config::AppConfig;
use error::ServiceError;
use orchestrator::Orchestrator;
use strava::FitnessPlatform;
use summarizer::Summarizer;

/// Shared handler state: the orchestrator plus the bits of configuration the
/// transport layer owns (webhook secret, weekday gate, authorization URL).
pub struct AppState<P, S> {
    pub orchestrator: Arc<Orchestrator<P, S>>,
    pub config: Arc<AppConfig>,
    pub auth_url: String,
}

impl<P, S> Clone for AppState<P, S> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            config: Arc::clone(&self.config),
            auth_url: self.auth_url.clone(),
        }
    }
}

pub fn build_app<P, S>(state: AppState<P, S>) -> Router
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(landing_page))
        .route("/exchange_token", get(exchange_token))
        .route("/token", get(token_status))
        .route("/update_workout", get(update_workout))
        .route("/annotate_workout", get(annotate_workout))
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .with_state(state)
}

async fn landing_page<P, S>(State(state): State<AppState<P, S>>) -> Html<String>
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    Html(format!(
        "<!DOCTYPE html>\
         <html><body>\
         <h1>Runrecap</h1>\
         <p>If the application is not yet authorized, grant access here: \
         <a href=\"{0}\">{0}</a></p>\
         <p>Otherwise trigger a weekly digest via /update_workout?workout_id=&lt;id&gt;.</p>\
         </body></html>",
        state.auth_url
    ))
}

#[derive(Deserialize)]
struct ExchangeParams {
    code: Option<String>,
}

async fn exchange_token<P, S>(
    State(state): State<AppState<P, S>>,
    Query(params): Query<ExchangeParams>,
) -> Response
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let code = match params.code.as_deref() {
        Some(code) if !code.is_empty() => code,
        _ => {
            return error_response(ServiceError::InvalidInput(
                "missing authorization code".into(),
            ));
        }
    };

    match state.orchestrator.complete_authorization(code).await {
        Ok(()) => (StatusCode::OK, "Authorization complete, tokens stored.").into_response(),
        Err(error) => error_response(error),
    }
}

async fn token_status<P, S>(State(state): State<AppState<P, S>>) -> Response
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    match state.orchestrator.token_status().await {
        Ok(expires_at) => (
            StatusCode::OK,
            format!("Access token on file, valid until {expires_at}."),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Deserialize)]
struct WorkoutParams {
    workout_id: Option<String>,
}

impl WorkoutParams {
    /// Validate the identifier before anything downstream runs.
    fn parse(&self) -> Result<i64, ServiceError> {
        self.workout_id
            .as_deref()
            .unwrap_or_default()
            .parse::<i64>()
            .map_err(|err| ServiceError::InvalidInput(format!("workout_id: {err}")))
    }
}

async fn update_workout<P, S>(
    State(state): State<AppState<P, S>>,
    Query(params): Query<WorkoutParams>,
) -> Response
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let workout_id = match params.parse() {
        Ok(id) => id,
        Err(error) => return error_response(error),
    };

    match state.orchestrator.run_weekly_digest(workout_id).await {
        Ok(()) => (StatusCode::OK, "Workout description updated successfully!").into_response(),
        Err(error) => error_response(error),
    }
}

async fn annotate_workout<P, S>(
    State(state): State<AppState<P, S>>,
    Query(params): Query<WorkoutParams>,
) -> Response
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let workout_id = match params.parse() {
        Ok(id) => id,
        Err(error) => return error_response(error),
    };

    match state.orchestrator.annotate_workout(workout_id).await {
        Ok(()) => (StatusCode::OK, "Workout annotated successfully!").into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Subscription verification handshake: echo the challenge back as JSON when
/// the verify token matches, 403 otherwise.
async fn verify_webhook<P, S>(
    State(state): State<AppState<P, S>>,
    Query(params): Query<VerifyParams>,
) -> Response
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    match (params.mode.as_deref(), params.verify_token.as_deref()) {
        (Some("subscribe"), Some(token)) if token == state.config.verify_token => {
            tracing::info!("webhook subscription verified");
            let mut body = HashMap::new();
            body.insert("hub.challenge", params.challenge.unwrap_or_default());
            (StatusCode::OK, Json(body)).into_response()
        }
        (Some(_), Some(_)) => (StatusCode::FORBIDDEN, "403 Forbidden").into_response(),
        _ => (StatusCode::BAD_REQUEST, "Missing verification parameters").into_response(),
    }
}

/// Activity event as delivered by the platform's webhook push.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub object_type: String,
    pub object_id: i64,
    pub aspect_type: String,
}

/// Event intake. The digest runs only for newly created activities, and only
/// on the configured weekday; everything else is rejected without touching
/// the orchestrator.
async fn receive_webhook<P, S>(
    State(state): State<AppState<P, S>>,
    Json(event): Json<WebhookEvent>,
) -> Response
where
    P: FitnessPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let is_new_activity = event.object_type == "activity" && event.aspect_type == "create";
    if !is_new_activity || Utc::now().weekday() != state.config.summary_weekday {
        return (StatusCode::BAD_REQUEST, "Webhook event not supported yet.").into_response();
    }

    tracing::info!(workout_id = event.object_id, "webhook triggered weekly digest");
    match state.orchestrator.run_weekly_digest(event.object_id).await {
        Ok(()) => (StatusCode::OK, "Workout description updated successfully!").into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::CredentialUnavailable(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::CredentialRefreshFailed(_)
        | ServiceError::WorkoutFetchFailed { .. }
        | ServiceError::SummaryGenerationFailed(_)
        | ServiceError::WorkoutUpdateFailed { .. } => StatusCode::BAD_GATEWAY,
    };
    tracing::error!(%error, "request failed");
    (status, error.to_string()).into_response()
}
