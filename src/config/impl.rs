use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to defaults loaded from `config.toml` when `init_config*`
/// has not been called yet, so library callers never panic here.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::load()))
        .load_full()
}

/// Initialize the global configuration from "config.toml"
///
/// # Examples
/// ```no_run
/// use shopee_affiliate::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load()));
}

/// Initialize the global configuration from an explicit path
///
/// The loaded value is always stored, even when the configuration was
/// already initialized (or raced in by another thread), so `--config` wins.
pub fn init_config_from(path: &str) {
    let loaded = Arc::new(StaticConfig::load_from(path));
    CONFIG
        .get_or_init(|| ArcSwap::new(Arc::clone(&loaded)))
        .store(loaded);
}
