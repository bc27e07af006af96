use std::net::SocketAddr;
use std::time::Duration;

use arcade_core::catalog::Catalog;
use arcade_server::config::ServerConfig;
use arcade_server::state::AppState;
use arcade_server::{build_app, router};

pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with the builtin catalog.
    pub async fn new() -> Self {
        let (app, _state) = build_app(ServerConfig::default());
        Self::serve(app).await
    }

    /// Start a test server with a custom web root.
    pub async fn with_web_root(web_root: &str) -> Self {
        let config = ServerConfig {
            web_root: web_root.to_string(),
            ..ServerConfig::default()
        };
        let (app, _state) = build_app(config);
        Self::serve(app).await
    }

    /// Start a test server with an explicit catalog.
    pub async fn with_catalog(catalog: Catalog) -> Self {
        let state = AppState::with_catalog(ServerConfig::default(), catalog);
        Self::serve(router(state)).await
    }

    async fn serve(app: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }
}

/// GET a path and return status plus body text.
pub async fn get_text(server: &TestServer, path: &str) -> (u16, String) {
    let resp = reqwest::get(server.url(path)).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.text().await.unwrap())
}
