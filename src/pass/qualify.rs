use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pass::matcher::CandidatePair;
use crate::pass::sample::{PassTriple, QualifiedPass};

pub const DEFAULT_MIN_PEAK_ELEVATION_DEG: f64 = 80.0;
pub const DEFAULT_MIN_SUN_ELEVATION_DEG: f64 = 10.0;

/// Observation quality bar a pass has to clear to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Thresholds {
    #[serde(default = "default_min_peak_elevation")]
    pub min_peak_elevation_deg: f64,
    #[serde(default = "default_min_sun_elevation")]
    pub min_sun_elevation_deg: f64,
}

fn default_min_peak_elevation() -> f64 {
    DEFAULT_MIN_PEAK_ELEVATION_DEG
}

fn default_min_sun_elevation() -> f64 {
    DEFAULT_MIN_SUN_ELEVATION_DEG
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_peak_elevation_deg: DEFAULT_MIN_PEAK_ELEVATION_DEG,
            min_sun_elevation_deg: DEFAULT_MIN_SUN_ELEVATION_DEG,
        }
    }
}

impl Thresholds {
    /// High peak, satellite in sunlight and sun above the station's horizon
    /// bar at all three events. Bounds are inclusive.
    pub fn is_met_by(&self, triple: &PassTriple) -> bool {
        triple.peak.elevation_deg >= self.min_peak_elevation_deg
            && triple.samples().iter().all(|s| {
                s.sunlit && s.sun_elevation_deg >= self.min_sun_elevation_deg
            })
    }
}

/// Attach the owning pair to a triple that clears `thresholds`.
pub fn qualify(
    pair: &CandidatePair<'_>,
    triple: PassTriple,
    thresholds: &Thresholds,
) -> Option<QualifiedPass> {
    if !thresholds.is_met_by(&triple) {
        return None;
    }

    Some(QualifiedPass {
        satellite: pair.satellite.clone(),
        station: pair.station.clone(),
        pass: triple,
    })
}
