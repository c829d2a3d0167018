use std::path::PathBuf;

use crate::grid::RegionBounds;
use crate::zones::ScanConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub businesses_path: PathBuf,
    pub regions_path: PathBuf,
    pub places_api_key: Option<String>,
    /// Scan area used when no named region is requested.
    pub bounds: RegionBounds,
    pub scan: ScanConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("businesses_path", &self.businesses_path)
            .field("regions_path", &self.regions_path)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("bounds", &self.bounds)
            .field("scan", &self.scan)
            .finish()
    }
}
