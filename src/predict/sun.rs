//! Low-precision solar ephemeris (about 0.01 degree over 1950-2050), enough
//! for twilight and eclipse checks on LEO passes.

use chrono::{DateTime, Utc};

use crate::predict::ground_station::{GroundStation, EARTH_EQUATORIAL_RADIUS_KM};
use crate::predict::propagation::{gmst, look_angles_to, teme_to_ecef_position, SatelliteState};

const AU_KM: f64 = 149_597_870.7;
const J2000_JD: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

// Standard atmosphere for the refraction term.
const STANDARD_TEMPERATURE_C: f64 = 10.0;
const STANDARD_PRESSURE_MBAR: f64 = 1010.0;

pub fn julian_date(timestamp: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + timestamp.timestamp_millis() as f64 / 86_400_000.0
}

/// Geocentric sun vector in the equatorial frame of date, km.
pub fn sun_position_eci_km(timestamp: DateTime<Utc>) -> [f64; 3] {
    let n = julian_date(timestamp) - J2000_JD;

    let mean_longitude = (280.460 + 0.985_647_4 * n).rem_euclid(360.0);
    let mean_anomaly = (357.528 + 0.985_600_3 * n).rem_euclid(360.0).to_radians();
    let ecliptic_longitude = (mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
    .to_radians();
    let obliquity = (23.439 - 0.000_000_4 * n).to_radians();
    let distance_km = AU_KM
        * (1.000_14 - 0.016_71 * mean_anomaly.cos() - 0.000_14 * (2.0 * mean_anomaly).cos());

    [
        distance_km * ecliptic_longitude.cos(),
        distance_km * obliquity.cos() * ecliptic_longitude.sin(),
        distance_km * obliquity.sin() * ecliptic_longitude.sin(),
    ]
}

/// Apparent (refracted) elevation of the sun above the station's horizon, degrees.
pub fn sun_elevation_deg(station: &GroundStation, timestamp: DateTime<Utc>) -> f64 {
    let sun_ecef = teme_to_ecef_position(sun_position_eci_km(timestamp), gmst(timestamp));
    apparent_elevation_deg(look_angles_to(station, sun_ecef).elevation_deg)
}

/// Bennett refraction for an observed altitude, degrees. Zero outside
/// [-1, 89.9].
fn refraction_deg(observed_deg: f64) -> f64 {
    if !(-1.0..=89.9).contains(&observed_deg) {
        return 0.0;
    }
    let arcmin = 1.0 / (observed_deg + 7.31 / (observed_deg + 4.4)).to_radians().tan();
    arcmin / 60.0 * (0.28 * STANDARD_PRESSURE_MBAR / (STANDARD_TEMPERATURE_C + 273.0))
}

/// Lift a geometric altitude to where the atmosphere shows it. Bennett's
/// formula takes the observed altitude, so iterate to a fixed point.
fn apparent_elevation_deg(geometric_deg: f64) -> f64 {
    let mut apparent = geometric_deg;
    for _ in 0..10 {
        let next = geometric_deg + refraction_deg(apparent);
        if (next - apparent).abs() < 3.0e-5 {
            return next;
        }
        apparent = next;
    }
    apparent
}

/// Whether the straight line from the satellite to the sun clears the Earth.
pub fn is_sunlit(state: &SatelliteState) -> bool {
    let sat = state.position_teme_km;
    let sun = sun_position_eci_km(state.timestamp);
    let d = [sun[0] - sat[0], sun[1] - sat[1], sun[2] - sat[2]];

    let a = dot(d, d);
    let b = 2.0 * dot(sat, d);
    let c = dot(sat, sat) - EARTH_EQUATORIAL_RADIUS_KM * EARTH_EQUATORIAL_RADIUS_KM;
    if c < 0.0 {
        return false;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return true;
    }
    let far = (-b + discriminant.sqrt()) / (2.0 * a);
    far <= 0.0
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
