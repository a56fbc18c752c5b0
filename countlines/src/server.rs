//! HTTP server for the web UI.
//!
//! Serves `GET /api/count`, which runs one traversal per request and
//! returns the JSON report, plus the static files of the web UI. Every
//! request gets its own [`ExclusionSet`] and result; the traversal runs on
//! a blocking worker so concurrent requests do not stall the runtime.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use countlineslib::{validate_target, walk, CountError, CountReport, ExclusionSet};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info};

/// Port used when `--web` is given without a value.
pub const DEFAULT_PORT: u16 = 8080;

/// Settings for the web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding `index.html` and the other static files
    pub web_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            web_root: PathBuf::from("web"),
        }
    }
}

impl ServerConfig {
    /// Socket address the server binds to.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// State shared across HTTP handlers.
struct AppState {
    web_root: PathBuf,
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        web_root: config.web_root.clone(),
    });

    Router::new()
        .route("/api/count", get(api_count).fallback(method_not_allowed))
        .fallback(serve_static)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Bind and serve until the process is stopped.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind socket to {addr}"))?;

    info!(%addr, web_root = %config.web_root.display(), "web server listening");

    println!();
    println!("======================================");
    println!("  CountLines Web Server Started");
    println!("======================================");
    println!("  Port: {}", config.port);
    println!("  URL:  http://localhost:{}", config.port);
    println!("======================================");
    println!("Press Ctrl+C to stop the server");
    println!();

    axum::serve(listener, router(&config))
        .await
        .context("web server stopped unexpectedly")?;

    Ok(())
}

/// `GET /api/count?path=<dir>&exclude=<pattern>...`
async fn api_count(Query(params): Query<Vec<(String, String)>>) -> Response {
    let mut target: Option<String> = None;
    let mut excludes = ExclusionSet::with_defaults();

    for (key, value) in params {
        match key.as_str() {
            "path" if target.is_none() => target = Some(value),
            "exclude" => excludes.push(value),
            _ => {}
        }
    }

    let Some(target) = target.filter(|p| !p.is_empty()) else {
        return json_error(StatusCode::BAD_REQUEST, "Missing path parameter");
    };

    debug!(path = %target, patterns = excludes.len(), "count request");

    let task = tokio::task::spawn_blocking(move || -> countlineslib::Result<CountReport> {
        validate_target(&target)?;
        let started = Instant::now();
        let result = walk(&target, &excludes);
        Ok(CountReport::new(&result, target, started.elapsed()))
    });

    match task.await {
        Ok(Ok(report)) => {
            info!(
                path = %report.target_path,
                files = report.total_files,
                lines = report.total_lines,
                seconds = report.processing_time,
                "counted"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Ok(Err(CountError::PathNotFound(_))) => {
            json_error(StatusCode::NOT_FOUND, "Path does not exist")
        }
        Ok(Err(CountError::NotADirectory(_))) => {
            json_error(StatusCode::BAD_REQUEST, "Path is not a directory")
        }
        Ok(Err(err)) => {
            error!(error = %err, "count failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
        Err(err) => {
            error!(error = %err, "count task panicked or was cancelled");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to count lines")
        }
    }
}

/// Serve a file from the web root.
async fn serve_static(State(state): State<Arc<AppState>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return html_error(StatusCode::METHOD_NOT_ALLOWED);
    }

    let Some(file_path) = resolve_asset(&state.web_root, uri.path()) else {
        return html_error(StatusCode::NOT_FOUND);
    };

    let mut file = match tokio::fs::File::open(&file_path).await {
        Ok(f) => f,
        Err(err) => {
            debug!(path = %file_path.display(), error = %err, "static file not found");
            return html_error(StatusCode::NOT_FOUND);
        }
    };

    let mut content = Vec::new();
    if let Err(err) = file.read_to_end(&mut content).await {
        error!(path = %file_path.display(), error = %err, "failed to read static file");
        return html_error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    (
        [(header::CONTENT_TYPE, content_type_for(&file_path))],
        content,
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    html_error(StatusCode::METHOD_NOT_ALLOWED)
}

/// Map a request path onto a file under `web_root`.
///
/// `/` and `/index.html` both map to `index.html`. Paths with a `..`
/// segment are refused.
pub fn resolve_asset(web_root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = match request_path {
        "/" | "/index.html" => "index.html",
        other => other.trim_start_matches('/'),
    };

    if relative.is_empty() || relative.split('/').any(|segment| segment == "..") {
        return None;
    }

    Some(web_root.join(relative))
}

/// Content type for a static file, by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        _ => "text/html",
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn html_error(status: StatusCode) -> Response {
    let body = format!("<html><body><h1>{status}</h1></body></html>");
    (status, Html(body)).into_response()
}
