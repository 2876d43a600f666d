use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

pub struct TestServer {
    #[allow(dead_code)]
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // LINE points at a closed port: every upstream call fails fast with a
        // transport error, which exercises the fallback and validation paths
        // without touching the real API.
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_traffy-fondue"));
        cmd.env("FONDUE_PORT", port.to_string())
            .env("APP_ENV", "development")
            .env_remove("BOTS_CONFIG")
            .env("LINE_BOT_KEY", "traffy_main")
            .env("LINE_CHANNEL_ACCESS_TOKEN", "integration-token")
            .env("LINE_API_BASE_URL", "http://127.0.0.1:1")
            .env("LINE_DATA_API_BASE_URL", "http://127.0.0.1:1")
            .env("LINE_REQUEST_TIMEOUT_SECS", "2")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start a server for one test. It is killed when the returned value drops.
pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
