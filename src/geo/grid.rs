// src/geo/grid.rs

use crate::config::LocationConfig;

/// A grid cell: the bucket key plus the cell's rounded center.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub key: String,
    pub lat: f64,
    pub lng: f64,
}

/// Maps coordinates onto a fixed-size lat/lng grid.
///
/// Rounding is `f64::round` (half away from zero). Two coordinate pairs land in
/// the same bucket iff their rounded cells format to the same key; there is no
/// distance computation anywhere.
#[derive(Debug, Clone, Copy)]
pub struct GridKeyer {
    grid_size: f64,
}

impl GridKeyer {
    pub fn new(cfg: &LocationConfig) -> Self {
        Self {
            grid_size: cfg.grid_size,
        }
    }

    pub fn cell(&self, lat: f64, lng: f64) -> GridCell {
        let lat = self.snap(lat);
        let lng = self.snap(lng);
        GridCell {
            key: format!("{lat:.3}_{lng:.3}"),
            lat,
            lng,
        }
    }

    #[cfg(test)]
    pub fn key(&self, lat: f64, lng: f64) -> String {
        self.cell(lat, lng).key
    }

    fn snap(&self, v: f64) -> f64 {
        // `+ 0.0` folds -0.0 into 0.0 so keys never read "-0.000".
        (v / self.grid_size).round() * self.grid_size + 0.0
    }
}

impl Default for GridKeyer {
    fn default() -> Self {
        Self::new(&LocationConfig::default())
    }
}
