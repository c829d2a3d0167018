//! Geographic grid walk for opportunity scans.
//!
//! Emits lat/lng lattice points row by row (latitude outer, longitude inner)
//! across a rectangular region. Coordinates advance by repeated float addition,
//! so the final row/column lands wherever the accumulation puts it relative to
//! the max bounds.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Rectangular scan area in geographic (unprojected) degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl RegionBounds {
    /// Sofia, Bulgaria. The reference deployment's default map area.
    #[must_use]
    pub const fn sofia() -> Self {
        Self {
            lat_min: 42.62,
            lat_max: 42.75,
            lng_min: 23.27,
            lng_max: 23.38,
        }
    }

    /// `true` when both axes span a strictly positive, finite range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat_min.is_finite()
            && self.lat_max.is_finite()
            && self.lng_min.is_finite()
            && self.lng_max.is_finite()
            && self.lat_min < self.lat_max
            && self.lng_min < self.lng_max
    }

    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lng_min..=self.lng_max).contains(&point.lng)
    }

    /// Walk this region's lattice at `step` degrees.
    #[must_use]
    pub fn walk(&self, step: f64) -> GridWalk {
        GridWalk::new(self, step)
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::sofia()
    }
}

/// Lazy row-major iterator over the lattice points of a [`RegionBounds`].
///
/// Yields nothing for invalid bounds or a non-positive step. Stops early if the
/// step is too small to move a coordinate at its magnitude.
#[derive(Debug, Clone)]
pub struct GridWalk {
    bounds: RegionBounds,
    step: f64,
    lat: f64,
    lng: f64,
    done: bool,
}

impl GridWalk {
    #[must_use]
    pub fn new(bounds: &RegionBounds, step: f64) -> Self {
        let usable_step = step.is_finite() && step > 0.0;
        Self {
            bounds: *bounds,
            step,
            lat: bounds.lat_min,
            lng: bounds.lng_min,
            done: !usable_step || !bounds.is_valid(),
        }
    }

    /// Approximate number of points: `(lat span / step + 1) * (lng span / step + 1)`.
    ///
    /// Accumulated float error can make the real count differ by a row or column.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn estimated_len(&self) -> usize {
        if self.done {
            return 0;
        }
        let rows = ((self.bounds.lat_max - self.bounds.lat_min) / self.step).floor() + 1.0;
        let cols = ((self.bounds.lng_max - self.bounds.lng_min) / self.step).floor() + 1.0;
        (rows * cols) as usize
    }
}

impl Iterator for GridWalk {
    type Item = GeoPoint;

    #[allow(clippy::float_cmp)]
    fn next(&mut self) -> Option<GeoPoint> {
        loop {
            if self.done || self.lat > self.bounds.lat_max {
                self.done = true;
                return None;
            }

            if self.lng <= self.bounds.lng_max {
                let point = GeoPoint::new(self.lat, self.lng);
                let next_lng = self.lng + self.step;
                if next_lng == self.lng {
                    self.done = true;
                }
                self.lng = next_lng;
                return Some(point);
            }

            let next_lat = self.lat + self.step;
            if next_lat == self.lat {
                self.done = true;
                return None;
            }
            self.lat = next_lat;
            self.lng = self.bounds.lng_min;
        }
    }
}
