use crate::fetch::Upstream;
use crate::prelude::{eprintln, *};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use wikioutline_core::outline::OutlineMode;

const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "OUTLINE_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "OUTLINE_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

#[derive(Debug)]
pub struct AppState {
    pub upstream: Upstream,
    pub mode: OutlineMode,
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    let state = Arc::new(AppState {
        upstream: Upstream::new(&global.settings.upstream())?,
        mode: global.settings.outline_mode(),
    });

    if global.verbose {
        eprintln!("Outline server listening on http://{}", addr);
        eprintln!("Outline endpoint: http://{}/api/outline?country=<name>", addr);
        eprintln!("Upstream: {}", global.settings.base_url);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Listening on http://{addr} (mode: {})", state.mode);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Build the application router
///
/// Every response, including errors and unknown routes, carries the same
/// permissive CORS headers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/outline",
            get(outline_handler).options(preflight_handler),
        )
        .fallback(fallback_handler)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

async fn outline_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> std::result::Result<Response, Error> {
    let country = first_value(params, "country")
        .filter(|c| !c.trim().is_empty())
        .ok_or(Error::MissingParameter("country"))?;

    log::info!("Outline requested for '{country}'");

    let output = crate::outline::generate_outline(&state.upstream, &country, state.mode).await?;

    log::info!(
        "Outline for '{country}' ready: {} lines in {} ms",
        output.lines.len(),
        output.fetch_time_ms
    );

    Ok((
        [(header::CONTENT_TYPE, MARKDOWN_CONTENT_TYPE)],
        output.markdown,
    )
        .into_response())
}

/// First value of a query key; later repeats are ignored
fn first_value(params: Vec<(String, String)>, key: &str) -> Option<String> {
    params
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
}

async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn fallback_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(crate::error::ErrorBody {
            error: "Not Found".to_string(),
        }),
    )
        .into_response()
}
