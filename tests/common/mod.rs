//! Shared helpers for integration tests: in-process mock servers and a
//! gateway wired to an in-memory store.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use sqlx::{Connection, SqliteConnection};
use tracing::Span;

use brl_quote_gateway::api;
use brl_quote_gateway::app_state::AppState;
use brl_quote_gateway::fetcher::{HttpQuoteFetcher, RetryPolicy, RetryingQuoteFetcher};
use brl_quote_gateway::persistence::SqliteQuoteStore;
use brl_quote_gateway::service::QuoteService;

/// Path the mock provider answers on.
pub const PROVIDER_PATH: &str = "/json/last/USD-BRL";

/// Binds `router` to an ephemeral local port and serves it in the background.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("cannot bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Mock quote provider that waits `delay`, then answers `status` with `body`.
/// Returns its address and a counter of received requests.
pub async fn spawn_provider(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> (SocketAddr, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        PROVIDER_PATH,
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response()
            }
        }),
    );
    (spawn_server(router).await, hits)
}

/// Gateway under test together with its store.
pub struct TestGateway {
    /// Address the gateway listens on.
    pub addr: SocketAddr,
    /// The store shared with the gateway.
    pub store: SqliteQuoteStore,
}

impl TestGateway {
    /// URL of `path` on the gateway.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// Starts a gateway using the production retry policy against the provider
/// at `provider`, backed by a fresh in-memory store.
pub async fn spawn_gateway(provider: SocketAddr) -> TestGateway {
    let Ok(store) = SqliteQuoteStore::in_memory(Span::none()).await else {
        panic!("in-memory store");
    };
    // Looser than the 10 ms production insert deadline to keep CI stable.
    spawn_gateway_with(
        provider,
        store,
        Duration::from_millis(250),
        Duration::from_secs(5),
    )
    .await
}

/// Starts a gateway with an explicit store, insert deadline and outer
/// request timeout.
pub async fn spawn_gateway_with(
    provider: SocketAddr,
    store: SqliteQuoteStore,
    save_timeout: Duration,
    request_timeout: Duration,
) -> TestGateway {
    let fetcher = RetryingQuoteFetcher::new(
        HttpQuoteFetcher::new(
            reqwest::Client::new(),
            format!("http://{provider}{PROVIDER_PATH}"),
        ),
        RetryPolicy::default(),
        Span::none(),
    );
    let service = QuoteService::new(fetcher, store.clone(), 3, save_timeout, Span::none());
    let state = AppState {
        quote_service: Arc::new(service),
    };
    let addr = spawn_server(api::build_app(state, request_timeout)).await;
    TestGateway { addr, store }
}

/// SQLite database file in the temp directory, removed on drop.
pub struct TempDatabase {
    /// Location of the database file.
    pub path: PathBuf,
}

impl TempDatabase {
    /// Picks a fresh, not yet existing database path.
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("cotacoes-{}.db", uuid::Uuid::new_v4()));
        Self { path }
    }

    /// Connection URL of the database.
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }

    /// Opens the quote store on this file.
    pub async fn store(&self) -> SqliteQuoteStore {
        let Ok(store) = SqliteQuoteStore::connect(&self.url(), 5, Span::none()).await else {
            panic!("file store");
        };
        store
    }

    /// Opens an independent connection to the same file.
    pub async fn connection(&self) -> SqliteConnection {
        let Ok(conn) = SqliteConnection::connect(&self.url()).await else {
            panic!("second connection");
        };
        conn
    }

    /// Returns every stored `(bid, timestamp)` pair, read over a separate
    /// connection.
    pub async fn rows(&self) -> Vec<(String, i64)> {
        let mut conn = self.connection().await;
        let Ok(rows) = sqlx::query_as::<_, (String, i64)>(
            "SELECT bid, timestamp FROM cotacoes ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await
        else {
            panic!("select failed");
        };
        let _ = conn.close().await;
        rows
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
