mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["bots"], 1);
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::start_server().await?;
    let body = reqwest::get(format!("{}/", server.base_url))
        .await?
        .json::<serde_json::Value>()
        .await?;

    assert_eq!(body["name"], "Traffy Fondue Admin API");
    assert!(body["endpoints"]["richmenu"].is_string());
    Ok(())
}

#[tokio::test]
async fn server_stops_when_handle_drops() -> Result<()> {
    let server = common::start_server().await?;
    let url = format!("{}/health", server.base_url);
    assert!(reqwest::get(&url).await.is_ok());

    drop(server);
    assert!(reqwest::get(&url).await.is_err());
    Ok(())
}
