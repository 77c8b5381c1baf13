use async_trait::async_trait;

use crate::{MarketSnapshot, Result};

/// Abstraction over wherever price history comes from.
///
/// The strategy layer never fetches data itself: a source produces a complete
/// `MarketSnapshot` and the caller hands it to the manager with
/// `update_market_data`. `FileFeed` in `crates/feed` implements this for
/// snapshots stored on disk.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the full, chronologically ordered history for the next round.
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot>;
}
