mod config;
mod errors;
mod models;
mod routes;
mod spellcheck;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::spellcheck::external::{DisabledChecker, GeneralChecker, RemoteSpellChecker};
use crate::spellcheck::models::{ForeignWorkerCategory, ResumeCategory};
use crate::spellcheck::pipeline::SpellCheckPipeline;
use crate::spellcheck::scoring::PenaltyWeights;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KoWork API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the general checker (remote when an endpoint is configured)
    let checker = build_checker(&config)?;
    info!(
        "General checker initialized (backend: {}, timeout: {:?})",
        checker.backend(),
        config.spellcheck_timeout
    );

    let pipeline = SpellCheckPipeline::new(checker)
        .strict(config.strict_general_check)
        .with_resume_weights(
            PenaltyWeights::<ResumeCategory>::default()
                .with_overrides(config.resume_penalty_overrides.clone()),
        )
        .with_detector_weights(
            PenaltyWeights::<ForeignWorkerCategory>::default()
                .with_overrides(config.detector_penalty_overrides.clone()),
        );
    if config.strict_general_check {
        info!("Strict general check enabled: general failures fail the whole check");
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        pipeline: Arc::new(pipeline),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins to the web UI host
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_checker(config: &Config) -> Result<Arc<dyn GeneralChecker>> {
    match &config.spellcheck_api_url {
        Some(url) => {
            let remote = RemoteSpellChecker::new(url.clone(), config.spellcheck_timeout)
                .context("Failed to build spell-check HTTP client")?;
            Ok(Arc::new(remote))
        }
        None => {
            warn!("SPELLCHECK_API_URL not set; general spell check is disabled");
            Ok(Arc::new(DisabledChecker))
        }
    }
}
