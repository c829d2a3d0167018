//! Opportunity-zone command handlers.
//!
//! Scan parameters resolve in three layers: env config, then the named
//! region's overrides, then command-line flags.

use std::path::PathBuf;

use barbermap_core::{
    load_barbershops, load_regions, load_shop_locations, scan, AppConfig, GeoPoint, Located,
    OpportunityZone, RegionBounds, ScanConfig,
};
use clap::Args;

#[derive(Debug, Args)]
pub struct ZonesArgs {
    /// Scan a named region from the regions file (by name or slug)
    #[arg(long)]
    pub region: Option<String>,
    /// Lattice spacing in degrees
    #[arg(long)]
    pub grid_step: Option<f64>,
    /// Points with a shop within this many km are not opportunities
    #[arg(long)]
    pub radius_km: Option<f64>,
    /// Minimum distance between reported zones in km
    #[arg(long)]
    pub min_separation_km: Option<f64>,
    /// Read shops from this JSON file instead of the configured one
    #[arg(long)]
    pub businesses: Option<PathBuf>,
    /// Also treat user-added pins from this JSON file as shops
    #[arg(long)]
    pub extra_shops: Option<PathBuf>,
    /// Show only the best N zones
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print zones as JSON
    #[arg(long)]
    pub json: bool,
}

impl ZonesArgs {
    fn apply(&self, base: ScanConfig) -> ScanConfig {
        ScanConfig {
            grid_step: self.grid_step.unwrap_or(base.grid_step),
            search_radius_km: self.radius_km.unwrap_or(base.search_radius_km),
            min_zone_separation_km: self
                .min_separation_km
                .unwrap_or(base.min_zone_separation_km),
        }
    }
}

/// Resolve the scan area and tunables for this run.
fn resolve_target(
    config: &AppConfig,
    args: &ZonesArgs,
) -> anyhow::Result<(String, RegionBounds, ScanConfig)> {
    let (label, bounds, base) = if let Some(name) = args.region.as_deref() {
        let regions = load_regions(&config.regions_path)?;
        let region = regions.find(name).ok_or_else(|| {
            anyhow::anyhow!(
                "region '{name}' not found in {}",
                config.regions_path.display()
            )
        })?;
        (
            region.name.clone(),
            region.bounds,
            region.scan_config(&config.scan),
        )
    } else {
        ("default".to_string(), config.bounds, config.scan)
    };
    Ok((label, bounds, args.apply(base)))
}

/// Format a nearest-shop distance for display, returning `"no shops"` when infinite.
fn fmt_distance(km: f64) -> String {
    if km.is_finite() {
        format!("{km:.2} km")
    } else {
        "no shops".to_string()
    }
}

/// Run an opportunity scan and print the ranked zones.
///
/// # Errors
///
/// Returns an error if shop data or regions cannot be loaded, or if the scan
/// parameters are not strictly positive.
pub(crate) fn run_zones(config: &AppConfig, args: &ZonesArgs) -> anyhow::Result<()> {
    let (label, bounds, scan_config) = resolve_target(config, args)?;

    let path = args
        .businesses
        .as_deref()
        .unwrap_or(config.businesses_path.as_path());
    let shops = load_barbershops(path)?;
    let mut points: Vec<GeoPoint> = shops.iter().map(Located::location).collect();

    if let Some(extra) = args.extra_shops.as_deref() {
        let pins = load_shop_locations(extra)?;
        tracing::info!(count = pins.len(), path = %extra.display(), "including user-added shops");
        points.extend(pins.iter().map(Located::location));
    }

    let outside = points.iter().filter(|p| !bounds.contains(p)).count();
    if outside > 0 {
        tracing::debug!(region = %label, outside, "some shops lie outside the scan area");
    }

    tracing::debug!(
        region = %label,
        grid_step = scan_config.grid_step,
        radius_km = scan_config.search_radius_km,
        min_separation_km = scan_config.min_zone_separation_km,
        grid_points = bounds.walk(scan_config.grid_step).estimated_len(),
        "starting opportunity scan"
    );

    let mut zones = scan(&points, &bounds, &scan_config)?;
    tracing::info!(
        region = %label,
        shops = points.len(),
        zones = zones.len(),
        "opportunity scan complete"
    );

    if let Some(limit) = args.limit {
        zones.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&zones)?);
    } else {
        print_zones(&label, &zones);
    }
    Ok(())
}

fn print_zones(label: &str, zones: &[OpportunityZone]) {
    if zones.is_empty() {
        println!("no opportunity zones in region '{label}'; every point is within range of a shop");
        return;
    }

    println!("{:<6}{:<12}{:<12}NEAREST SHOP", "RANK", "LAT", "LNG");
    for (rank, zone) in zones.iter().enumerate() {
        println!(
            "{:<6}{:<12.5}{:<12.5}{}",
            rank + 1,
            zone.lat,
            zone.lng,
            fmt_distance(zone.nearest_distance_km)
        );
    }
}

/// List the regions from the configured regions file.
///
/// # Errors
///
/// Returns an error if the regions file cannot be read or fails validation.
pub(crate) fn run_regions(config: &AppConfig) -> anyhow::Result<()> {
    let regions = load_regions(&config.regions_path)?;
    println!(
        "{:<20}{:<22}{:<22}{:<8}RADIUS",
        "SLUG", "LAT", "LNG", "STEP"
    );
    for region in &regions.regions {
        let cfg = region.scan_config(&config.scan);
        println!(
            "{:<20}{:<22}{:<22}{:<8}{} km",
            region.slug(),
            format!("{}..{}", region.bounds.lat_min, region.bounds.lat_max),
            format!("{}..{}", region.bounds.lng_min, region.bounds.lng_max),
            cfg.grid_step,
            cfg.search_radius_km
        );
    }
    Ok(())
}
