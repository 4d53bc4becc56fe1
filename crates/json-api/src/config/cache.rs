//! Cache Config

use std::time::Duration;

use clap::Args;

/// Catalog cache settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// Seconds a cached catalog listing stays valid
    #[arg(long, env = "ITEMS_CACHE_TTL_SECONDS", default_value_t = 60_u64)]
    pub items_cache_ttl_seconds: u64,
}

impl CacheConfig {
    /// Catalog listing time-to-live.
    #[must_use]
    pub fn items_ttl(&self) -> Duration {
        Duration::from_secs(self.items_cache_ttl_seconds)
    }
}
