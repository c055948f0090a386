use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;

/// Satellite position at an instant, in the inertial frame SGP4 works in,
/// together with the Earth rotation angle needed to move to ECEF.
#[derive(Debug, Clone, Copy)]
pub struct SatelliteState {
    pub timestamp: DateTime<Utc>,
    pub position_teme_km: [f64; 3],
    pub gmst: f64,
}

impl SatelliteState {
    pub fn position_ecef_km(&self) -> [f64; 3] {
        teme_to_ecef_position(self.position_teme_km, self.gmst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
}

pub fn propagate(
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<SatelliteState, PredictError> {
    let minutes = elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = constants.propagate(minutes)?;

    Ok(SatelliteState {
        timestamp,
        position_teme_km: prediction.position,
        gmst: gmst(timestamp),
    })
}

pub fn gmst(timestamp: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()))
}

/// Elevation, azimuth and slant range of an ECEF point seen from `station`.
pub fn look_angles_to(station: &GroundStation, target_ecef_km: [f64; 3]) -> LookAngles {
    let sta = station.position_ecef_km();
    let dr = [
        target_ecef_km[0] - sta[0],
        target_ecef_km[1] - sta[1],
        target_ecef_km[2] - sta[2],
    ];
    let range_km = norm(dr);

    let (east, north, up) = ecef_to_enu(dr, station.lat_rad(), station.lon_rad());
    let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
    let elevation_deg = if range_km > 0.0 {
        (up / range_km).asin().to_degrees()
    } else {
        0.0
    };

    LookAngles {
        elevation_deg,
        azimuth_deg,
        range_km,
    }
}

pub fn look_angles(station: &GroundStation, state: &SatelliteState) -> LookAngles {
    look_angles_to(station, state.position_ecef_km())
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

pub fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{iss, iss_epoch};
    use super::*;
    use crate::catalog::GeoPosition;

    fn station(latitude_deg: f64, longitude_deg: f64) -> GroundStation {
        GroundStation::new(
            GeoPosition {
                latitude_deg,
                longitude_deg,
            },
            0.0,
        )
    }

    #[test]
    fn test_iss_altitude_is_low_earth_orbit() {
        let (elements, constants) = iss();
        let state = propagate(&elements, &constants, iss_epoch()).unwrap();
        let radius = norm(state.position_teme_km);
        assert!(radius > 6700.0 && radius < 6900.0, "radius {radius}");
    }

    #[test]
    fn test_point_overhead_is_at_zenith() {
        let gs = station(35.0, 139.0);
        let sta = gs.position_ecef_km();
        let scale = (norm(sta) + 400.0) / norm(sta);
        let above = [sta[0] * scale, sta[1] * scale, sta[2] * scale];
        let angles = look_angles_to(&gs, above);
        // Geodetic vertical differs slightly from the geocentric radius.
        assert!(angles.elevation_deg > 89.0, "{}", angles.elevation_deg);
        assert!((angles.range_km - 400.0).abs() < 1.0);
    }

    #[test]
    fn test_azimuth_points_north_and_east() {
        let gs = station(0.0, 0.0);
        let sta = gs.position_ecef_km();

        let north = look_angles_to(&gs, [sta[0], sta[1], sta[2] + 100.0]);
        assert!(north.azimuth_deg.abs() < 1e-6 || (north.azimuth_deg - 360.0).abs() < 1e-6);
        assert!(north.elevation_deg.abs() < 1e-6);

        let east = look_angles_to(&gs, [sta[0], sta[1] + 100.0, sta[2]]);
        assert!((east.azimuth_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_teme_to_ecef_preserves_length() {
        let v = [4000.0, -3000.0, 4500.0];
        let r = teme_to_ecef_position(v, 1.234);
        assert!((norm(r) - norm(v)).abs() < 1e-9);
        assert_eq!(r[2], v[2]);
    }
}
