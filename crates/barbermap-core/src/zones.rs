//! Opportunity-zone scan.
//!
//! Walks a lat/lng lattice over a region, keeps the points whose nearest
//! business is farther than the search radius, thins them greedily in walk
//! order, and ranks the survivors farthest-first. Every step is a pure
//! function of its inputs; identical inputs give identical output, order
//! included.

use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::geo::{GeoPoint, Located};
use crate::grid::RegionBounds;

/// Tunables for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Lattice spacing in degrees. Cost grows quadratically as this shrinks.
    pub grid_step: f64,
    /// A point is underserved only if its nearest business is strictly farther than this.
    pub search_radius_km: f64,
    /// Minimum pairwise distance between emitted zones.
    pub min_zone_separation_km: f64,
}

impl ScanConfig {
    pub const DEFAULT_GRID_STEP: f64 = 0.015;
    pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 1.5;
    pub const DEFAULT_MIN_ZONE_SEPARATION_KM: f64 = 0.5;

    /// Reject any non-positive or non-finite parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ScanError> {
        let fields = [
            ("grid_step", self.grid_step),
            ("search_radius_km", self.search_radius_km),
            ("min_zone_separation_km", self.min_zone_separation_km),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScanError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            grid_step: Self::DEFAULT_GRID_STEP,
            search_radius_km: Self::DEFAULT_SEARCH_RADIUS_KM,
            min_zone_separation_km: Self::DEFAULT_MIN_ZONE_SEPARATION_KM,
        }
    }
}

/// A lattice point together with the distance to its closest business.
///
/// `nearest_distance_km` is `f64::INFINITY` when there are no businesses; it
/// serializes to JSON `null` in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateZone {
    pub lat: f64,
    pub lng: f64,
    pub nearest_distance_km: f64,
}

/// A candidate that survived the radius filter and de-duplication.
pub type OpportunityZone = CandidateZone;

impl Located for CandidateZone {
    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Distance from `point` to the closest business, or `INFINITY` when there are none.
#[must_use]
pub fn nearest_distance_km<B: Located>(point: &GeoPoint, businesses: &[B]) -> f64 {
    businesses
        .iter()
        .map(|b| point.distance_km(&b.location()))
        .fold(f64::INFINITY, f64::min)
}

/// Every lattice point whose nearest business is strictly farther than `search_radius_km`,
/// in walk order.
#[must_use]
pub fn candidates<B: Located>(
    businesses: &[B],
    bounds: &RegionBounds,
    grid_step: f64,
    search_radius_km: f64,
) -> Vec<CandidateZone> {
    bounds
        .walk(grid_step)
        .filter_map(|point| {
            let nearest = nearest_distance_km(&point, businesses);
            (nearest > search_radius_km).then_some(CandidateZone {
                lat: point.lat,
                lng: point.lng,
                nearest_distance_km: nearest,
            })
        })
        .collect()
}

/// Greedy spatial thinning: first accepted wins.
///
/// Candidates are visited in the order given. Each is kept only if no
/// already-kept zone lies closer than `min_separation_km`; rejected candidates
/// are never reconsidered. Order-dependent and not an optimal packing.
#[must_use]
pub fn dedupe(
    candidates: impl IntoIterator<Item = CandidateZone>,
    min_separation_km: f64,
) -> Vec<OpportunityZone> {
    let mut accepted: Vec<OpportunityZone> = Vec::new();
    for zone in candidates {
        let here = zone.location();
        let too_close = accepted
            .iter()
            .any(|kept| here.distance_km(&kept.location()) < min_separation_km);
        if !too_close {
            accepted.push(zone);
        }
    }
    accepted
}

/// Order zones farthest-from-any-business first. Ties keep their input order.
pub fn rank(zones: &mut [OpportunityZone]) {
    zones.sort_by(|a, b| b.nearest_distance_km.total_cmp(&a.nearest_distance_km));
}

/// Find underserved locations in `bounds`.
///
/// Walks the lattice, filters by radius, de-duplicates in walk order, then
/// ranks the survivors. Inverted or degenerate bounds yield an empty list.
///
/// # Errors
///
/// Returns [`ScanError::InvalidConfig`] if any `config` value is not strictly positive.
pub fn scan<B: Located>(
    businesses: &[B],
    bounds: &RegionBounds,
    config: &ScanConfig,
) -> Result<Vec<OpportunityZone>, ScanError> {
    config.validate()?;
    if !bounds.is_valid() {
        return Ok(Vec::new());
    }

    let found = candidates(
        businesses,
        bounds,
        config.grid_step,
        config.search_radius_km,
    );
    let mut zones = dedupe(found, config.min_zone_separation_km);
    rank(&mut zones);
    Ok(zones)
}

#[cfg(test)]
#[path = "zones_test.rs"]
mod tests;
