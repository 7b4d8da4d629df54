use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::AppConfig;

static CONFIG: OnceLock<ArcSwap<AppConfig>> = OnceLock::new();

/// Get the global configuration.
///
/// Falls back to defaults when [`init_config`] has not run, so library
/// users that configure everything explicitly never need to call it.
pub fn get_config() -> Arc<AppConfig> {
    match CONFIG.get() {
        Some(config) => config.load_full(),
        None => Arc::new(AppConfig::default()),
    }
}

/// Initialize the global configuration from `path` (or `linkcraft.toml`).
/// Later calls keep the first configuration.
pub fn init_config(path: Option<&str>) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(AppConfig::load(path)));
}

/// Replace the global configuration wholesale
pub fn update_config(config: AppConfig) {
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(config)),
        None => {
            let _ = CONFIG.set(ArcSwap::from_pointee(config));
        }
    }
}
