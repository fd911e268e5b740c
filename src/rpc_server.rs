//! Fusen RPC Server — JSON-RPC over stdin/stdout for shell integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"controller.request_create", "params":{}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries protocol lines only.

use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{info, warn};

use fusen::app::App;
use fusen::rpc_handler::handle_method;
use fusen::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use fusen::telemetry;

/// Viewport width assumed until the shell reports one.
const INITIAL_VIEWPORT_WIDTH: u32 = 1024;

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

async fn emit(stdout: &mut io::Stdout, value: &Value) -> io::Result<()> {
    let mut line = value.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_stderr("fusen=info");

    let config_path = std::env::var("FUSEN_CONFIG").ok();
    let mut engine = SettingsEngine::new(config_path);
    let settings = engine.load()?;
    let app = Mutex::new(App::new(settings, INITIAL_VIEWPORT_WIDTH)?);

    let mut stdout = io::stdout();
    emit(&mut stdout, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).await?;
    info!("rpc server ready");

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparsable request");
                emit(&mut stdout, &json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            emit(&mut stdout, &json!({"id": id, "error": "rate limit exceeded"})).await?;
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        emit(&mut stdout, &response).await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
