//! Voucher configuration caching using Moka.
//!
//! Configurations change rarely but are read on every allocation, so they
//! are cached per module with a TTL. Reference-data mutations invalidate the
//! touched module (or everything); stale reads after a local invalidation
//! are not acceptable, stale reads within the TTL are.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use super::types::{VoucherConfig, VoucherModule};

/// Default cache capacity (number of modules).
const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Process-wide cache of voucher configurations, keyed by lowercased module
/// name. Thread-safe; readers never block writers.
#[derive(Clone)]
pub struct VoucherConfigCache {
    cache: Cache<String, Arc<VoucherConfig>>,
}

impl VoucherConfigCache {
    /// Creates a cache with default settings (64 entries, 5 minute TTL).
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL_SECS)
    }

    /// Creates a cache with a custom TTL in seconds.
    #[must_use]
    pub fn with_ttl(ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(DEFAULT_CACHE_CAPACITY)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Returns the cached configuration for a module, if fresh.
    #[must_use]
    pub fn get(&self, module: VoucherModule) -> Option<Arc<VoucherConfig>> {
        self.cache.get(module.as_str())
    }

    /// Stores a freshly loaded configuration.
    pub fn insert(&self, module: VoucherModule, config: VoucherConfig) {
        self.cache
            .insert(module.as_str().to_string(), Arc::new(config));
    }

    /// Invalidates the entry for one module.
    pub fn invalidate(&self, module: VoucherModule) {
        self.cache.invalidate(module.as_str());
    }

    /// Invalidates every cached entry.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Runs cache maintenance tasks so invalidations become visible to
    /// `entry_count` immediately.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    /// Number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for VoucherConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voucher::types::DateFormat;

    fn config(prefix: &str) -> VoucherConfig {
        VoucherConfig {
            prefix: prefix.to_string(),
            number_length: 4,
            date_format: DateFormat::Iso,
            is_auto_increment: false,
            sequence: 0,
            voucher_type: "Sales".to_string(),
        }
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = VoucherConfigCache::new();
        assert!(cache.get(VoucherModule::MetalSale).is_none());

        cache.insert(VoucherModule::MetalSale, config("SAL"));
        let hit = cache.get(VoucherModule::MetalSale).unwrap();
        assert_eq!(hit.prefix, "SAL");
    }

    #[test]
    fn test_invalidate_single_module() {
        let cache = VoucherConfigCache::new();
        cache.insert(VoucherModule::MetalSale, config("SAL"));
        cache.insert(VoucherModule::PurchaseFixing, config("PF"));

        cache.invalidate(VoucherModule::MetalSale);
        cache.run_pending_tasks();

        assert!(cache.get(VoucherModule::MetalSale).is_none());
        assert!(cache.get(VoucherModule::PurchaseFixing).is_some());
    }

    #[test]
    fn test_invalidate_all() {
        let cache = VoucherConfigCache::new();
        cache.insert(VoucherModule::MetalSale, config("SAL"));
        cache.insert(VoucherModule::Transfer, config("TRF"));

        cache.invalidate_all();
        cache.run_pending_tasks();

        assert!(cache.get(VoucherModule::MetalSale).is_none());
        assert!(cache.get(VoucherModule::Transfer).is_none());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_replacement_updates_value() {
        let cache = VoucherConfigCache::new();
        cache.insert(VoucherModule::MetalSale, config("SAL"));
        cache.insert(VoucherModule::MetalSale, config("SL2"));
        assert_eq!(cache.get(VoucherModule::MetalSale).unwrap().prefix, "SL2");
    }
}
