use crate::error::StartupError;
use crate::logger::read_logs;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::error;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Binds before anything is served so "ready" only fires on a live port.
pub async fn bind(port: u16) -> Result<TcpListener, StartupError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

const FAVICON_ROUTE: &str = "/favicon.png";

pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(handle_root))
        .route("/api/health", get(handle_health))
        .route(FAVICON_ROUTE, get(handle_icon));
    // The icon is also reachable under its own logical path, e.g. /images/todo.png.
    if let Some(route) = icon_route(&state.config.desktop.icon_resource) {
        router = router.route(&route, get(handle_icon));
    }
    router.with_state(state)
}

/// `None` when the logical path cannot be mounted as a literal route or
/// would collide with one of the fixed routes.
fn icon_route(logical: &str) -> Option<String> {
    let literal = !logical.is_empty()
        && logical.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.starts_with([':', '*'])
                && !segment.contains(['{', '}'])
        });
    let route = format!("/{}", logical);
    (literal && route != FAVICON_ROUTE && !route.starts_with("/api/")).then_some(route)
}

pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), StartupError> {
    axum::serve(listener, router(state).into_make_service())
        .await
        .map_err(StartupError::Serve)
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    url: String,
    started_at: String,
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        url: state.board_url.clone(),
        started_at: state.started_at.to_rfc3339(),
    })
}

async fn handle_icon(State(state): State<Arc<AppState>>) -> Response {
    match state.resources.read(&state.config.desktop.icon_resource) {
        Ok(Some(bytes)) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to read icon resource: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn handle_root(State(state): State<Arc<AppState>>) -> Html<String> {
    let config_json = serde_json::to_string_pretty(&state.config)
        .unwrap_or_else(|_| "Config not available.".to_string());
    let logs = read_logs(&state.app_data_dir).await;

    let html = format!(
        r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>Todo Board</title>
            <link rel="icon" type="image/png" href="/favicon.png">
            <style>
                body {{ font-family: sans-serif; line-height: 1.6; padding: 20px; background: #f4f4f4; }}
                h1, h2 {{ color: #333; }}
                pre {{ background: #eee; padding: 15px; border-radius: 5px; overflow-x: auto; }}
                .container {{ max-width: 900px; margin: auto; background: #fff; padding: 20px; border-radius: 8px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }}
                .section {{ margin-bottom: 20px; }}
            </style>
        </head>
        <body>
            <div class="container">
                <h1>Todo Board</h1>

                <div class="section">
                    <h2>Running At</h2>
                    <pre><code>{board_url} (since {started_at})</code></pre>
                </div>

                <div class="section">
                    <h2>Configuration</h2>
                    <pre><code>{config_json}</code></pre>
                </div>

                <div class="section">
                    <h2>Recent Logs (Last 200 lines)</h2>
                    <pre><code>{logs}</code></pre>
                </div>
            </div>
        </body>
        </html>
        "#,
        board_url = html_escape(&state.board_url),
        started_at = state.started_at.format("%Y-%m-%d %H:%M:%S"),
        config_json = html_escape(&config_json),
        logs = html_escape(&logs)
    );

    Html(html)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
