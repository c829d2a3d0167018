use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::grid::RegionBounds;
use crate::zones::ScanConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields the Sofia
/// reference setup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{value} is not a finite number"),
            })
        }
    };

    let parse_positive = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let value = parse_f64(var, default)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be greater than zero, got {value}"),
            })
        }
    };

    let env = parse_environment(&or_default("BARBERMAP_ENV", "development"))?;
    let log_level = or_default("BARBERMAP_LOG_LEVEL", "info");
    let businesses_path = PathBuf::from(or_default(
        "BARBERMAP_BUSINESSES_PATH",
        "./data/barbershops.json",
    ));
    let regions_path = PathBuf::from(or_default(
        "BARBERMAP_REGIONS_PATH",
        "./config/regions.yaml",
    ));
    let places_api_key = lookup("BARBERMAP_PLACES_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    let sofia = RegionBounds::sofia();
    let bounds = RegionBounds {
        lat_min: parse_f64("BARBERMAP_LAT_MIN", sofia.lat_min)?,
        lat_max: parse_f64("BARBERMAP_LAT_MAX", sofia.lat_max)?,
        lng_min: parse_f64("BARBERMAP_LNG_MIN", sofia.lng_min)?,
        lng_max: parse_f64("BARBERMAP_LNG_MAX", sofia.lng_max)?,
    };
    if !bounds.is_valid() {
        return Err(ConfigError::Validation(format!(
            "scan bounds need lat_min < lat_max and lng_min < lng_max, got {bounds:?}"
        )));
    }

    let scan = ScanConfig {
        grid_step: parse_positive("BARBERMAP_GRID_STEP", ScanConfig::DEFAULT_GRID_STEP)?,
        search_radius_km: parse_positive(
            "BARBERMAP_SEARCH_RADIUS_KM",
            ScanConfig::DEFAULT_SEARCH_RADIUS_KM,
        )?,
        min_zone_separation_km: parse_positive(
            "BARBERMAP_MIN_ZONE_SEPARATION_KM",
            ScanConfig::DEFAULT_MIN_ZONE_SEPARATION_KM,
        )?,
    };

    Ok(AppConfig {
        env,
        log_level,
        businesses_path,
        regions_path,
        places_api_key,
        bounds,
        scan,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BARBERMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
