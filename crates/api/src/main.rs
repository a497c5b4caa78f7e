mod config;
mod metrics;
mod pipeline;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};
use crate::pipeline::{AnalyzeOptions, Analyzer, PairReport};

struct AppState {
    analyzer: Analyzer,
    metrics: Arc<Metrics>,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
    #[serde(default)]
    include_question_entities: bool,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    run_id: Uuid,
    pairs: Vec<PairReport>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Missing credentials are fatal before anything else starts.
    let config = AppConfig::from_env()?;
    let metrics = Metrics::new();

    let llm_client = llm::AnthropicClient::new(config.anthropic_api_key.clone());
    let structurer =
        structure::Structurer::new(llm_client.clone(), config.structure_model.clone());
    let wiki_client = match &config.wiki_api_url {
        Some(url) => wiki::WikiClient::with_api_url(url.clone(), &config.wiki_user_agent)?,
        None => wiki::WikiClient::new(&config.wiki_user_agent)?,
    };
    let pageviews = match &config.pageviews_api_url {
        Some(url) => wiki::PageviewsClient::with_base_url(url.clone(), &config.wiki_user_agent)?,
        None => wiki::PageviewsClient::new(&config.wiki_user_agent)?,
    };

    let analyzer = Analyzer::new(
        structurer,
        llm_client,
        config.key_entity_model.clone(),
        wiki::Resolver::new(wiki_client),
        pageviews,
        metrics.clone(),
    );

    let state = Arc::new(AppState { analyzer, metrics });

    let app = Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    info!("Server listening on http://{}", config.server_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    if req.text.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "text is empty".to_string()));
    }

    let run_id = Uuid::new_v4();
    let timer = TimedOperation::start();
    let options = AnalyzeOptions {
        include_question_entities: req.include_question_entities,
    };

    info!(%run_id, "Analysis run started");
    match state.analyzer.analyze(&req.text, options).await {
        Ok(pairs) => {
            state.metrics.record_run(true, timer.elapsed());
            info!(%run_id, pairs = pairs.len(), "Analysis run finished");
            Ok(Json(AnalyzeResponse { run_id, pairs }))
        }
        Err(e) => {
            state.metrics.record_run(false, timer.elapsed());
            // Only structuring errors escape the pipeline; per-entity
            // failures are folded into the reports.
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("failed to structure input: {e:#}"),
            ))
        }
    }
}
