use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::RegionBounds;
use crate::zones::ScanConfig;
use crate::ConfigError;

/// A named scan area with optional per-region scan tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    #[serde(flatten)]
    pub bounds: RegionBounds,
    pub grid_step: Option<f64>,
    pub search_radius_km: Option<f64>,
    pub min_zone_separation_km: Option<f64>,
}

impl RegionConfig {
    /// Lowercase, dash-separated slug of the region name.
    ///
    /// Letters and digits from any script are kept so Cyrillic names stay
    /// recognizable; every other character separates words.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Overlay this region's tunables on `base`.
    #[must_use]
    pub fn scan_config(&self, base: &ScanConfig) -> ScanConfig {
        ScanConfig {
            grid_step: self.grid_step.unwrap_or(base.grid_step),
            search_radius_km: self.search_radius_km.unwrap_or(base.search_radius_km),
            min_zone_separation_km: self
                .min_zone_separation_km
                .unwrap_or(base.min_zone_separation_km),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

impl RegionsFile {
    /// Look a region up by name or slug, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&RegionConfig> {
        let wanted = name.trim().to_lowercase();
        self.regions
            .iter()
            .find(|r| r.name.to_lowercase() == wanted || r.slug() == wanted)
    }
}

/// Load and validate the regions configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<RegionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions_file: RegionsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::RegionsFileParse)?;

    validate_regions(&regions_file)?;

    Ok(regions_file)
}

fn validate_regions(regions_file: &RegionsFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for region in &regions_file.regions {
        if region.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }

        if !region.bounds.is_valid() {
            return Err(ConfigError::Validation(format!(
                "region '{}' has invalid bounds; need lat_min < lat_max and lng_min < lng_max",
                region.name
            )));
        }

        let overrides = [
            ("grid_step", region.grid_step),
            ("search_radius_km", region.search_radius_km),
            ("min_zone_separation_km", region.min_zone_separation_km),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(ConfigError::Validation(format!(
                        "region '{}' has non-positive {field} {v}",
                        region.name
                    )));
                }
            }
        }

        let slug = region.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region slug: '{}' (from region '{}')",
                slug, region.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str) -> RegionConfig {
        RegionConfig {
            name: name.to_string(),
            bounds: RegionBounds::sofia(),
            grid_step: None,
            search_radius_km: None,
            min_zone_separation_km: None,
        }
    }

    #[test]
    fn slug_simple_name() {
        assert_eq!(region("Sofia Center").slug(), "sofia-center");
    }

    #[test]
    fn slug_keeps_cyrillic() {
        assert_eq!(region("София 2").slug(), "софия-2");
        assert_eq!(region("Пловдив - Център").slug(), "пловдив-център");
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(region("Sofia (Lozenets) / South").slug(), "sofia-lozenets-south");
    }

    #[test]
    fn scan_config_overlays_overrides() {
        let mut r = region("Sofia");
        r.search_radius_km = Some(0.75);
        let cfg = r.scan_config(&ScanConfig::default());
        assert!((cfg.search_radius_km - 0.75).abs() < f64::EPSILON);
        assert!((cfg.grid_step - ScanConfig::DEFAULT_GRID_STEP).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_rejects_empty_name() {
        let file = RegionsFile {
            regions: vec![region("  ")],
        };
        let err = validate_regions(&file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let mut r = region("Upside Down");
        r.bounds.lat_min = 43.0;
        let err = validate_regions(&RegionsFile { regions: vec![r] }).unwrap_err();
        assert!(err.to_string().contains("invalid bounds"));
    }

    #[test]
    fn validate_rejects_zero_override() {
        let mut r = region("Zero Step");
        r.grid_step = Some(0.0);
        let err = validate_regions(&RegionsFile { regions: vec![r] }).unwrap_err();
        assert!(err.to_string().contains("grid_step"));
    }

    #[test]
    fn validate_rejects_duplicate_slug() {
        let file = RegionsFile {
            regions: vec![region("Sofia Center"), region("sofia--center")],
        };
        let err = validate_regions(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate region slug"));
    }

    #[test]
    fn find_accepts_name_or_slug() {
        let file = RegionsFile {
            regions: vec![region("Sofia"), region("Sofia Center")],
        };
        assert_eq!(file.find("sofia-center").map(|r| r.name.as_str()), Some("Sofia Center"));
        assert_eq!(file.find("SOFIA").map(|r| r.name.as_str()), Some("Sofia"));
        assert!(file.find("varna").is_none());

        let cyrillic = RegionsFile {
            regions: vec![region("София")],
        };
        assert_eq!(cyrillic.find("СОФИЯ").map(|r| r.name.as_str()), Some("София"));
    }

    #[test]
    fn load_regions_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("regions.yaml");
        let result = load_regions(&path);
        assert!(result.is_ok(), "failed to load regions.yaml: {result:?}");
        let file = result.unwrap();
        let sofia = file.find("sofia").expect("sofia region present");
        assert_eq!(sofia.bounds, RegionBounds::sofia());
        let center = file.find("sofia-center").expect("sofia center present");
        assert_eq!(center.grid_step, Some(0.005));
    }

    #[test]
    fn load_regions_missing_file() {
        let err = load_regions(Path::new("/no/such/regions.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::RegionsFileIo { .. }));
    }
}
