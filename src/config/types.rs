use std::time::Duration;

use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct SyncConfig {
    /// Sleep between namespace sweeps, in milliseconds.
    /// Env: MP_SYNC_INTERVAL_MS
    #[envconfig(from = "MP_SYNC_INTERVAL_MS", default = "1000")]
    pub interval_ms: u64,

    /// Restrict the controller to a single namespace. When unset, every
    /// namespace in the cluster is swept.
    /// Env: MP_SYNC_NAMESPACE
    #[envconfig(from = "MP_SYNC_NAMESPACE")]
    pub namespace: Option<String>,

    #[envconfig(nested)]
    pub features: FeaturesConfig,
}

#[derive(Envconfig, Clone, Debug)]
pub struct FeaturesConfig {
    /// Env: MP_SYNC_FEATURES_SINGLETON
    #[envconfig(from = "MP_SYNC_FEATURES_SINGLETON", default = "true")]
    pub singleton: bool,

    /// Env: MP_SYNC_FEATURES_CACHED
    #[envconfig(from = "MP_SYNC_FEATURES_CACHED", default = "true")]
    pub cached: bool,
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
