use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BARBERMAP_ENV"));
}

#[test]
fn build_app_config_defaults_to_sofia() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.businesses_path, PathBuf::from("./data/barbershops.json"));
    assert_eq!(cfg.regions_path, PathBuf::from("./config/regions.yaml"));
    assert!(cfg.places_api_key.is_none());
    assert_eq!(cfg.bounds, RegionBounds::sofia());
    assert_eq!(cfg.scan, ScanConfig::default());
}

#[test]
fn build_app_config_scan_overrides() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_GRID_STEP", "0.005");
    map.insert("BARBERMAP_SEARCH_RADIUS_KM", "2.5");
    map.insert("BARBERMAP_MIN_ZONE_SEPARATION_KM", " 1 ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.scan.grid_step - 0.005).abs() < f64::EPSILON);
    assert!((cfg.scan.search_radius_km - 2.5).abs() < f64::EPSILON);
    assert!((cfg.scan.min_zone_separation_km - 1.0).abs() < f64::EPSILON);
}

#[test]
fn build_app_config_bounds_override() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_LAT_MIN", "42.12");
    map.insert("BARBERMAP_LAT_MAX", "42.17");
    map.insert("BARBERMAP_LNG_MIN", "24.70");
    map.insert("BARBERMAP_LNG_MAX", "24.78");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.bounds.lat_min - 42.12).abs() < f64::EPSILON);
    assert!((cfg.bounds.lng_max - 24.78).abs() < f64::EPSILON);
}

#[test]
fn build_app_config_rejects_inverted_bounds() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_LAT_MIN", "43.0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::Validation(_))),
        "expected Validation, got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unparseable_step() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_GRID_STEP", "fine");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BARBERMAP_GRID_STEP"),
        "expected InvalidEnvVar(BARBERMAP_GRID_STEP), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_radius() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_SEARCH_RADIUS_KM", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BARBERMAP_SEARCH_RADIUS_KM"),
        "expected InvalidEnvVar(BARBERMAP_SEARCH_RADIUS_KM), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_infinite_separation() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_MIN_ZONE_SEPARATION_KM", "inf");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn blank_api_key_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_PLACES_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.places_api_key.is_none());
}

#[test]
fn debug_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("BARBERMAP_PLACES_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
