use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::render::render;
use crate::state::ViewerState;

/// Fixed polling interval: 600 000 ms, not configurable.
const REFRESH_INTERVAL: Duration = Duration::from_millis(600_000);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-viewer", version, about = "Terminal weather panel")]
pub struct Cli {
    /// Base URL of the weather-server instance.
    #[arg(long, default_value = "http://localhost:3000")]
    pub server_url: String,
}

impl Cli {
    /// Cooperative run loop: one task handles the periodic refresh, stdin
    /// commands and teardown, so the viewer state needs no locking and at
    /// most one refresh is in flight at a time.
    pub async fn run(self) -> Result<()> {
        let client = ApiClient::new(self.server_url)?;
        let mut state = ViewerState::new();

        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal_cancel.cancel();
            }
        });

        // First tick fires immediately: fetch on activation, then every
        // interval. The ticker is dropped when the loop exits.
        let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        print!("{}", render(&state));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    refresh(&client, &mut state).await;
                }
                line = lines.next_line() => {
                    let Ok(Some(line)) = line else { break };
                    match line.trim() {
                        "" => continue,
                        "q" => break,
                        "n" => state.select_next(),
                        "p" => state.select_previous(),
                        "r" => {
                            state.begin_retry();
                            refresh(&client, &mut state).await;
                        }
                        other => match other.parse::<usize>() {
                            Ok(index) => state.select_index(index),
                            Err(_) => {
                                tracing::debug!("Ignoring unknown command: {other}");
                                continue;
                            }
                        },
                    }
                }
            }
            print!("{}", render(&state));
        }

        tracing::info!("Viewer shutting down");
        Ok(())
    }
}

async fn refresh(client: &ApiClient, state: &mut ViewerState) {
    match client.fetch().await {
        Ok(result) => state.apply_result(result),
        Err(err) => {
            tracing::warn!(error = %err, "Refresh failed; keeping previous data");
            state.apply_error(err.to_string());
        }
    }
}
