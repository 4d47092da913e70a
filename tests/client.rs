//! Tests for the single-shot quote client against a mock quote server.

#![allow(clippy::panic)]

mod common;

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tracing::Span;

use brl_quote_gateway::client::ClientFetcher;
use brl_quote_gateway::config::ClientConfig;
use brl_quote_gateway::error::ClientError;

use common::spawn_server;

async fn spawn_quote_server(status: StatusCode, body: &'static str, delay: Duration) -> String {
    let router = Router::new().route(
        "/cotacao",
        get(move || async move {
            tokio::time::sleep(delay).await;
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }),
    );
    let addr = spawn_server(router).await;
    format!("http://{addr}/cotacao")
}

fn output_path() -> PathBuf {
    std::env::temp_dir().join(format!("cotacao-{}.txt", uuid::Uuid::new_v4()))
}

fn make_client(server_url: String, output_path: PathBuf) -> ClientFetcher {
    let config = ClientConfig {
        server_url,
        timeout: Duration::from_millis(300),
        output_path,
    };
    ClientFetcher::new(reqwest::Client::new(), config, Span::none())
}

#[tokio::test]
async fn writes_quote_file_on_success() {
    let url = spawn_quote_server(StatusCode::OK, r#"{"bid":"5.10"}"#, Duration::ZERO).await;
    let path = output_path();
    let client = make_client(url, path.clone());

    let Ok(line) = client.run().await else {
        panic!("client run failed");
    };
    assert_eq!(line, "Dólar: 5.10");

    let Ok(content) = tokio::fs::read_to_string(&path).await else {
        panic!("output file missing");
    };
    assert_eq!(content, "Dólar: 5.10");
    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn overwrites_previous_content() {
    let url = spawn_quote_server(StatusCode::OK, r#"{"bid":"5.10"}"#, Duration::ZERO).await;
    let path = output_path();
    let _ = tokio::fs::write(&path, "Dólar: 4.99 with an old and longer trailer").await;
    let client = make_client(url, path.clone());

    assert!(client.run().await.is_ok());
    let Ok(content) = tokio::fs::read_to_string(&path).await else {
        panic!("output file missing");
    };
    assert_eq!(content, "Dólar: 5.10");
    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn slow_server_times_out_without_writing() {
    let url =
        spawn_quote_server(StatusCode::OK, r#"{"bid":"5.10"}"#, Duration::from_secs(2)).await;
    let path = output_path();
    let client = make_client(url, path.clone());

    let result = client.run().await;
    assert!(matches!(result, Err(ClientError::Timeout)), "{result:?}");
    assert!(!path.exists());
}

#[tokio::test]
async fn non_200_status_fails_without_writing() {
    let url = spawn_quote_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        "failed to fetch quote",
        Duration::ZERO,
    )
    .await;
    let path = output_path();
    let client = make_client(url, path.clone());

    let result = client.run().await;
    assert!(
        matches!(result, Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR))),
        "{result:?}"
    );
    assert!(!path.exists());
}

#[tokio::test]
async fn undecodable_body_fails_without_writing() {
    let url = spawn_quote_server(StatusCode::OK, r#"{"ask":"5.10"}"#, Duration::ZERO).await;
    let path = output_path();
    let client = make_client(url, path.clone());

    let result = client.run().await;
    assert!(matches!(result, Err(ClientError::Decode(_))), "{result:?}");
    assert!(!path.exists());
}
