use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{Satellite, Station};

/// Position of a sample within a pass. Ordinals follow the rise → peak → set
/// order the event finder emits them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Rise = 0,
    Peak = 1,
    Set = 2,
}

/// Geometry and illumination at one event instant for a (satellite, station) pair.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GeometrySample {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
    pub sunlit: bool,
    pub sun_elevation_deg: f64,
}

/// Three consecutive samples of one pass, in rise, peak, set order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PassTriple {
    pub rise: GeometrySample,
    pub peak: GeometrySample,
    pub set: GeometrySample,
}

impl PassTriple {
    pub fn samples(&self) -> [&GeometrySample; 3] {
        [&self.rise, &self.peak, &self.set]
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.rise.timestamp
    }
}

/// A pass that met the qualification thresholds, with its owning pair.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QualifiedPass {
    pub satellite: Satellite,
    pub station: Station,
    #[serde(flatten)]
    pub pass: PassTriple,
}

impl QualifiedPass {
    pub fn start(&self) -> DateTime<Utc> {
        self.pass.start()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use super::{EventKind, GeometrySample};

    pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0).unwrap()
    }

    pub fn sample(kind: EventKind, timestamp: DateTime<Utc>) -> GeometrySample {
        GeometrySample {
            timestamp,
            kind,
            elevation_deg: match kind {
                EventKind::Peak => 85.0,
                _ => 40.0,
            },
            azimuth_deg: 180.0,
            range_km: 500.0,
            sunlit: true,
            sun_elevation_deg: 20.0,
        }
    }
}
