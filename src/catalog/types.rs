use serde::Serialize;
use utoipa::ToSchema;

/// A satellite and the frequency of its beacon.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Satellite {
    pub name: String,
    pub frequency_mhz: f64,
}

/// Inclusive receive range of a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct FrequencyBand {
    pub min_mhz: f64,
    pub max_mhz: f64,
}

impl FrequencyBand {
    /// Bounds are expected to be validated (min <= max) by the caller.
    pub fn new(min_mhz: f64, max_mhz: f64) -> Self {
        Self { min_mhz, max_mhz }
    }

    pub fn contains(&self, frequency_mhz: f64) -> bool {
        self.min_mhz <= frequency_mhz && frequency_mhz <= self.max_mhz
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeoPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// A receiving station (typically a WebSDR) and the bands it covers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Station {
    pub name: String,
    pub url: String,
    pub position: GeoPosition,
    pub bands: Vec<FrequencyBand>,
}

impl Station {
    pub fn receives(&self, frequency_mhz: f64) -> bool {
        self.bands.iter().any(|band| band.contains(frequency_mhz))
    }
}
