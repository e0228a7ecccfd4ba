//! Development server with live reload.
//!
//! Pages are rendered on request from the `.ndoc` sources through the same
//! loader as the static build. Connected browsers get a `reload` message over
//! `/ws` whenever a file under the docs directory changes.

use anyhow::{bail, Context, Result};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use regex::Regex;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tokio::sync::broadcast;

use crate::config::{self, SiteConfig};
use crate::parser;
use crate::render::html;
use crate::render::page::{self, Mode};
use crate::watch::DocsWatcher;

/// Page routes: `/`, `/math`, `/guide/intro`. No dots, so no traversal.
static RE_PAGE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/[\w\-/]*$").unwrap());

static RE_SOURCE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[\w\-/]*\.ndoc$").unwrap());

/// Server configuration.
pub struct ServeConfig {
    /// Project root holding `ndoc.yml` and the docs directory.
    pub root: PathBuf,
    /// Overrides the port from `ndoc.yml`.
    pub port: Option<u16>,
}

/// Shared per-server state handed to every request.
#[derive(Clone)]
pub struct AppState {
    docs: Arc<PathBuf>,
    site: Arc<SiteConfig>,
    reload: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(docs: PathBuf, site: SiteConfig, reload: broadcast::Sender<()>) -> Self {
        Self {
            docs: Arc::new(docs),
            site: Arc::new(site),
            reload,
        }
    }
}

/// Run the development server.
pub fn run(config: ServeConfig) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async { run_async(config).await })
}

async fn run_async(config: ServeConfig) -> Result<()> {
    let site = config::load(&config.root)?;
    let docs = site.docs_dir(&config.root);
    if !docs.is_dir() {
        bail!(
            "No docs/ directory found at {}. Please create one with .ndoc files.",
            docs.display()
        );
    }

    let (reload, _) = broadcast::channel(16);
    let _watcher = DocsWatcher::new(&docs, reload.clone())?;

    let port = config.port.unwrap_or(site.port);
    let app = router(AppState::new(docs, site, reload));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router; split out so tests can drive it without a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/live.js", get(|| async { javascript(page::LIVE_JS) }))
        .route("/search.js", get(|| async { javascript(page::SEARCH_JS) }))
        .fallback(page_or_source)
        .with_state(state)
}

fn javascript(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/javascript")], body).into_response()
}

fn plain(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

async fn page_or_source(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if RE_SOURCE_PATH.is_match(path) {
        serve_source(&state, path).await
    } else if RE_PAGE_PATH.is_match(path) {
        serve_page(&state, path).await
    } else {
        plain(StatusCode::NOT_FOUND, "404: Not Found".to_string())
    }
}

/// `/` → `index`, `/guide/intro/` → `guide/intro`
fn page_name(path: &str) -> &str {
    let name = path.trim_matches('/');
    if name.is_empty() {
        "index"
    } else {
        name
    }
}

async fn read_source(state: &AppState, name: &str) -> Option<String> {
    let file = state.docs.join(format!("{}.ndoc", name));
    match tokio::fs::read_to_string(&file).await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("No source for {}: {}", file.display(), e);
            None
        }
    }
}

/// Canonical markup for a source: canonical files as written, Markdown
/// files rewritten.
async fn serve_source(state: &AppState, path: &str) -> Response {
    let name = page_name(path.trim_end_matches(".ndoc"));
    match read_source(state, name).await {
        Some(text) => plain(StatusCode::OK, parser::to_canonical(&text)),
        None => plain(
            StatusCode::NOT_FOUND,
            "404: .ndoc file not found".to_string(),
        ),
    }
}

async fn serve_page(state: &AppState, path: &str) -> Response {
    let name = page_name(path);
    match read_source(state, name).await {
        Some(text) => {
            let doc = parser::load(&text);
            let fragments = html::render_fragments(&doc);
            Html(page::shell(&state.site, &doc.module.name, &fragments, Mode::Live)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Html(page::shell(&state.site, "", &page::not_found(), Mode::Live)),
        )
            .into_response(),
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let rx = state.reload.subscribe();
    ws.on_upgrade(move |socket| push_reloads(socket, rx))
}

/// Forward reload triggers to one client until either side goes away.
async fn push_reloads(mut socket: WebSocket, mut rx: broadcast::Receiver<()>) {
    tracing::debug!("Client connected for live updates");
    loop {
        tokio::select! {
            trigger = rx.recv() => match trigger {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    if socket.send(Message::Text("reload".into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    tracing::debug!("Client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_names() {
        assert_eq!(page_name("/"), "index");
        assert_eq!(page_name("/math"), "math");
        assert_eq!(page_name("/guide/intro/"), "guide/intro");
    }

    #[test]
    fn route_patterns_reject_traversal() {
        assert!(RE_PAGE_PATH.is_match("/"));
        assert!(RE_PAGE_PATH.is_match("/guide/intro-2"));
        assert!(!RE_PAGE_PATH.is_match("/../secret"));
        assert!(RE_SOURCE_PATH.is_match("/math.ndoc"));
        assert!(!RE_SOURCE_PATH.is_match("/../math.ndoc"));
        assert!(!RE_SOURCE_PATH.is_match("/math.html"));
    }

    fn state(dir: &std::path::Path) -> AppState {
        let (reload, _) = broadcast::channel(4);
        AppState::new(dir.to_path_buf(), SiteConfig::default(), reload)
    }

    async fn body(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn renders_page_from_markdown_source() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.ndoc"), "# Math\n## add\nAdds.\n").unwrap();

        let resp = page_or_source(State(state(dir.path())), Uri::from_static("/")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body(resp).await;
        assert!(html.contains("<h1>Math</h1>"));
        assert!(html.contains("<h3>add</h3>"));
        assert!(html.contains("/live.js"));
    }

    #[tokio::test]
    async fn serves_normalized_source() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("math.ndoc"), "# Math\nUtilities.").unwrap();

        let resp = page_or_source(State(state(dir.path())), Uri::from_static("/math.ndoc")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body(resp).await, "[module: Math]\ndesc: Utilities.");
    }

    #[tokio::test]
    async fn canonical_source_is_served_as_written() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = "[module: Math]\nnotes for later\n";
        std::fs::write(dir.path().join("math.ndoc"), source).unwrap();

        let resp = page_or_source(State(state(dir.path())), Uri::from_static("/math.ndoc")).await;
        assert_eq!(body(resp).await, source);
    }

    #[tokio::test]
    async fn missing_sources_are_404() {
        let dir = tempfile::TempDir::new().unwrap();
        let st = state(dir.path());

        let page = page_or_source(State(st.clone()), Uri::from_static("/nope")).await;
        assert_eq!(page.status(), StatusCode::NOT_FOUND);
        assert!(body(page).await.contains("<h1>404</h1><p>Page not found</p>"));

        let source = page_or_source(State(st.clone()), Uri::from_static("/nope.ndoc")).await;
        assert_eq!(source.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(source).await, "404: .ndoc file not found");

        let other = page_or_source(State(st), Uri::from_static("/style.css")).await;
        assert_eq!(other.status(), StatusCode::NOT_FOUND);
    }
}
