//! Test pages and the server that hosts them
//!
//! The five pages the interaction scenarios drive are compiled into the
//! crate. [`PageServer`] serves them over HTTP so a browser can load them;
//! files in an optional override directory take precedence, which makes it
//! easy to debug a page without rebuilding.
//!
//! ```text
//! GET /                       -> index of bundled pages
//! GET /{path}                 -> override dir file (ServeDir), else bundled page, else 404
//! ```
//!
//! Override paths are resolved by [`ServeDir`], which rejects anything that
//! does not stay inside the directory.

use crate::config::SuiteConfig;
use crate::result::{InteractionError, InteractionResult};
use crate::session::Session;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

/// Pages compiled into the crate, by file name
pub const BUNDLED_PAGES: &[(&str, &str)] = &[
    ("formPage.html", include_str!("../pages/formPage.html")),
    ("javascriptPage.html", include_str!("../pages/javascriptPage.html")),
    ("droppableItems.html", include_str!("../pages/droppableItems.html")),
    ("draggableLists.html", include_str!("../pages/draggableLists.html")),
    (
        "pointerActionsPage.html",
        include_str!("../pages/pointerActionsPage.html"),
    ),
];

/// Look up a bundled page
#[must_use]
pub fn bundled_page(name: &str) -> Option<&'static str> {
    BUNDLED_PAGES
        .iter()
        .find(|(page, _)| *page == name)
        .map(|(_, html)| *html)
}

/// Content type by file extension, octet-stream when unknown
#[must_use]
pub fn content_type(name: &str) -> String {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    let has_charset = mime.get_param(mime_guess::mime::CHARSET).is_some();
    if mime.type_() == mime_guess::mime::TEXT && !has_charset {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}

/// Page fixture: resolves page names against a base URL and loads them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pages {
    base_url: String,
}

impl Pages {
    /// Pages served under `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a page
    #[must_use]
    pub fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.trim_start_matches('/'))
    }

    /// Navigate the session to a page
    pub async fn load<S: Session + ?Sized>(&self, session: &S, name: &str) -> InteractionResult<()> {
        let url = self.url(name);
        debug!(%url, "loading page");
        session.navigate(&url).await
    }
}

/// Build the page router
///
/// With `pages_dir`, files under it shadow the bundled pages.
pub fn router(pages_dir: Option<PathBuf>) -> Router {
    let app = Router::new().route("/", get(serve_index));
    match pages_dir {
        Some(dir) => {
            app.fallback_service(ServeDir::new(dir).fallback(serve_bundled.into_service()))
        }
        None => app.fallback(serve_bundled),
    }
}

async fn serve_index() -> Html<String> {
    let links: String = BUNDLED_PAGES
        .iter()
        .map(|(name, _)| format!("<li><a href=\"{name}\">{name}</a></li>"))
        .collect();
    Html(format!(
        "<!DOCTYPE html><html><head><title>Test pages</title></head>\
         <body><ul>{links}</ul></body></html>"
    ))
}

async fn serve_bundled(uri: Uri) -> Response {
    let name = uri.path().trim_start_matches('/');
    match bundled_page(name) {
        Some(html) => ([(header::CONTENT_TYPE, content_type(name))], html).into_response(),
        None => {
            debug!(path = %uri.path(), "no such page");
            (StatusCode::NOT_FOUND, format!("no page named {name}")).into_response()
        }
    }
}

/// Running page server
#[derive(Debug)]
pub struct PageServer {
    addr: SocketAddr,
    public_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PageServer {
    /// Bind to `pages_port` (0 picks a free one) and serve in the background
    pub async fn start(config: &SuiteConfig) -> InteractionResult<Self> {
        let bind = SocketAddr::from(([0, 0, 0, 0], config.pages_port));
        let listener = tokio::net::TcpListener::bind(bind)
            .await
            .map_err(|e| InteractionError::PageServer {
                message: format!("failed to bind {bind}: {e}"),
            })?;
        let addr = listener.local_addr()?;
        let public_url = format!("http://{}:{}", config.pages_host, addr.port());

        let app = router(config.pages_dir.clone());
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await;
            if let Err(e) = served {
                warn!(error = %e, "page server stopped with error");
            }
        });

        info!(%addr, url = %public_url, "page server listening");
        Ok(Self {
            addr,
            public_url,
            shutdown: Some(tx),
            handle: Some(handle),
        })
    }

    /// Local socket address
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL browsers use to reach the server
    #[must_use]
    pub fn url(&self) -> &str {
        &self.public_url
    }

    /// Page fixture bound to this server
    #[must_use]
    pub fn pages(&self) -> Pages {
        Pages::new(self.public_url.clone())
    }

    /// Stop serving and wait for in-flight requests
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        debug!("page server stopped");
    }
}

impl Drop for PageServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockSession;

    mod bundle_tests {
        use super::*;

        #[test]
        fn test_all_pages_bundled() {
            for name in [
                "formPage.html",
                "javascriptPage.html",
                "droppableItems.html",
                "draggableLists.html",
                "pointerActionsPage.html",
            ] {
                let html = bundled_page(name).unwrap();
                assert!(html.contains("<html"), "{name} is not an html page");
            }
            assert!(bundled_page("missing.html").is_none());
        }

        #[test]
        fn test_pages_carry_expected_ids() {
            assert!(bundled_page("formPage.html").unwrap().contains("id=\"working\""));
            let js = bundled_page("javascriptPage.html").unwrap();
            assert!(js.contains("id=\"clickField\""));
            assert!(js.contains("id=\"doubleClickField\""));
            let lists = bundled_page("draggableLists.html").unwrap();
            assert!(lists.contains("id=\"rightitem-3\""));
            assert!(lists.contains("id=\"dragging_reports\""));
            let pointer = bundled_page("pointerActionsPage.html").unwrap();
            assert!(pointer.contains("allEvents"));
        }

        #[test]
        fn test_content_type() {
            assert_eq!(content_type("a.html"), "text/html; charset=utf-8");
            assert_eq!(content_type("a.css"), "text/css; charset=utf-8");
            assert_eq!(content_type("a.png"), "image/png");
            assert_eq!(content_type("a.unknownext"), "application/octet-stream");
        }
    }

    mod fixture_tests {
        use super::*;

        #[test]
        fn test_url_joining() {
            let pages = Pages::new("http://127.0.0.1:9000/");
            assert_eq!(pages.base_url(), "http://127.0.0.1:9000");
            assert_eq!(pages.url("formPage.html"), "http://127.0.0.1:9000/formPage.html");
            assert_eq!(pages.url("/formPage.html"), "http://127.0.0.1:9000/formPage.html");
        }

        #[tokio::test]
        async fn test_load_navigates() {
            let session = MockSession::new();
            Pages::new("http://pages.test")
                .load(&session, "javascriptPage.html")
                .await
                .unwrap();
            assert!(session.was_called("navigate:http://pages.test/javascriptPage.html"));
        }
    }

    mod server_tests {
        use super::*;

        async fn get(url: &str) -> (u16, String) {
            let resp = reqwest::get(url).await.unwrap();
            (resp.status().as_u16(), resp.text().await.unwrap())
        }

        #[tokio::test]
        async fn test_serves_bundled_pages() {
            let server = PageServer::start(&SuiteConfig::default()).await.unwrap();
            let base = format!("http://127.0.0.1:{}", server.addr().port());

            let (status, body) = get(&format!("{base}/formPage.html")).await;
            assert_eq!(status, 200);
            assert!(body.contains("id=\"working\""));

            let (status, body) = get(&format!("{base}/")).await;
            assert_eq!(status, 200);
            assert!(body.contains("draggableLists.html"));

            let (status, _) = get(&format!("{base}/nope.html")).await;
            assert_eq!(status, 404);

            let resp = reqwest::get(format!("{base}/pointerActionsPage.html"))
                .await
                .unwrap();
            assert_eq!(
                resp.headers()["content-type"],
                "text/html; charset=utf-8"
            );

            server.shutdown().await;
        }

        #[tokio::test]
        async fn test_override_dir_wins() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("formPage.html"), "<html>patched</html>").unwrap();
            std::fs::create_dir(dir.path().join("js")).unwrap();
            std::fs::write(dir.path().join("js").join("helper.js"), "var x = 1;").unwrap();

            let config = SuiteConfig::default().with_pages_dir(dir.path());
            let server = PageServer::start(&config).await.unwrap();
            let base = format!("http://127.0.0.1:{}", server.addr().port());

            let (_, body) = get(&format!("{base}/formPage.html")).await;
            assert_eq!(body, "<html>patched</html>");

            let (_, body) = get(&format!("{base}/javascriptPage.html")).await;
            assert!(body.contains("clickField"));

            let (status, body) = get(&format!("{base}/js/helper.js")).await;
            assert_eq!(status, 200);
            assert_eq!(body, "var x = 1;");

            server.shutdown().await;
        }

        #[tokio::test]
        async fn test_override_dir_confines_paths() {
            let outside = tempfile::tempdir().unwrap();
            let secret = outside.path().join("secret.txt");
            std::fs::write(&secret, "TOP-SECRET").unwrap();
            let dir = tempfile::tempdir().unwrap();

            let config = SuiteConfig::default().with_pages_dir(dir.path());
            let server = PageServer::start(&config).await.unwrap();
            let base = format!("http://127.0.0.1:{}", server.addr().port());

            let encoded = secret.to_string_lossy().replace('/', "%2F");
            for path in [
                format!("/{encoded}"),
                "/..%2F..%2Fetc%2Fpasswd".to_string(),
                "/%2Fetc%2Fpasswd".to_string(),
            ] {
                let (status, body) = get(&format!("{base}{path}")).await;
                assert_eq!(status, 404, "{path} escaped the pages dir");
                assert!(!body.contains("TOP-SECRET"));
            }

            server.shutdown().await;
        }

        #[tokio::test]
        async fn test_public_url_uses_pages_host() {
            let config = SuiteConfig::default().with_pages_host("host.docker.internal");
            let server = PageServer::start(&config).await.unwrap();
            assert_eq!(
                server.url(),
                format!("http://host.docker.internal:{}", server.addr().port())
            );
            assert_eq!(server.pages().base_url(), server.url());
        }
    }
}
