use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use common::{Error, MarketDataSource, MarketSnapshot, Result};

/// Market data source backed by a JSON file on disk.
///
/// The file holds one serialized `MarketSnapshot`:
/// `{"prices": [...], "highs": [...], "lows": [...]}`. It is re-read on every
/// fetch, so an external process can refresh it in place.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!(path = %path.display(), "FileFeed initialized");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MarketDataSource for FileFeed {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: MarketSnapshot = serde_json::from_str(&content)?;

        if snapshot.is_empty() {
            return Err(Error::MarketData(format!(
                "'{}' contains no prices",
                self.path.display()
            )));
        }

        debug!(
            path = %self.path.display(),
            bars = snapshot.len(),
            latest = ?snapshot.latest_price(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}

/// Fetch from `source` every `interval` and forward each snapshot.
///
/// Fetch failures are logged and skipped. Returns once the receiving side
/// of `snapshot_tx` is dropped. Call from `tokio::spawn`.
pub async fn poll_feed(
    source: Arc<dyn MarketDataSource>,
    interval: Duration,
    snapshot_tx: mpsc::Sender<MarketSnapshot>,
) {
    info!(interval_secs = interval.as_secs_f64(), "Market data poller running");
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        if snapshot_tx.is_closed() {
            break;
        }

        match source.fetch_snapshot().await {
            Ok(snapshot) => {
                if snapshot_tx.send(snapshot).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch market data, skipping round");
            }
        }
    }
    warn!("Snapshot channel closed, stopping market data poller");
}
