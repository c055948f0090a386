use crate::catalog::{Satellite, Station};
use crate::pass::GeometrySample;
use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::pass_finder::find_events;
use crate::predict::propagation::{look_angles, propagate};
use crate::predict::sun::{is_sunlit, sun_elevation_deg};
use crate::predict::tle_loader::TleLoader;
use crate::predict::types::Window;

/// Source of the chronological rise/peak/set samples for one pair.
pub trait PassGeometry {
    fn samples(
        &self,
        satellite: &Satellite,
        station: &Station,
        window: &Window,
    ) -> Result<Vec<GeometrySample>, PredictError>;
}

/// SGP4-backed geometry over a loaded TLE catalog.
pub struct Sgp4Geometry<'a> {
    tles: &'a TleLoader,
    min_elevation_deg: f64,
    station_altitude_m: f64,
}

impl<'a> Sgp4Geometry<'a> {
    pub fn new(tles: &'a TleLoader, min_elevation_deg: f64, station_altitude_m: f64) -> Self {
        Self {
            tles,
            min_elevation_deg,
            station_altitude_m,
        }
    }
}

impl PassGeometry for Sgp4Geometry<'_> {
    fn samples(
        &self,
        satellite: &Satellite,
        station: &Station,
        window: &Window,
    ) -> Result<Vec<GeometrySample>, PredictError> {
        let entry = self
            .tles
            .get(&satellite.name)
            .ok_or_else(|| PredictError::UnknownSatellite(satellite.name.clone()))?;
        log::debug!(
            "{} @ {}: NORAD {} from {}",
            satellite.name,
            station.name,
            entry.info.norad_id,
            entry.info.tle_source
        );
        let observer = GroundStation::new(station.position, self.station_altitude_m);

        let events = find_events(
            &observer,
            &entry.elements,
            &entry.constants,
            window,
            self.min_elevation_deg,
        )?;

        events
            .into_iter()
            .map(|(timestamp, kind)| {
                let state = propagate(&entry.elements, &entry.constants, timestamp)?;
                let angles = look_angles(&observer, &state);
                Ok(GeometrySample {
                    timestamp,
                    kind,
                    elevation_deg: angles.elevation_deg,
                    azimuth_deg: angles.azimuth_deg,
                    range_km: angles.range_km,
                    sunlit: is_sunlit(&state),
                    sun_elevation_deg: sun_elevation_deg(&observer, timestamp),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Duration;

    use super::*;
    use crate::catalog::{FrequencyBand, GeoPosition};
    use crate::pass::EventKind;
    use crate::predict::propagation::fixtures::{iss_epoch, ISS_LINE1, ISS_LINE2};

    fn loader() -> (tempfile::TempDir, TleLoader) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("stations.txt"),
            format!("ISS (ZARYA)\n{ISS_LINE1}\n{ISS_LINE2}\n"),
        )
        .unwrap();
        let mut loader = TleLoader::new(dir.path().to_path_buf());
        loader.load_all().unwrap();
        (dir, loader)
    }

    fn station() -> Station {
        Station {
            name: "test".into(),
            url: String::new(),
            position: GeoPosition {
                latitude_deg: 40.0,
                longitude_deg: -75.0,
            },
            bands: vec![FrequencyBand::new(144.0, 146.0)],
        }
    }

    #[test]
    fn test_samples_carry_geometry() {
        let (_dir, tles) = loader();
        let geometry = Sgp4Geometry::new(&tles, 10.0, 10.0);
        let satellite = Satellite {
            name: "ISS (ZARYA)".into(),
            frequency_mhz: 145.8,
        };
        let window = Window::new(iss_epoch(), Duration::days(1)).unwrap();

        let samples = geometry.samples(&satellite, &station(), &window).unwrap();
        assert!(!samples.is_empty());
        for s in &samples {
            assert!(s.range_km > 300.0 && s.range_km < 3000.0, "{}", s.range_km);
            assert!((0.0..360.0).contains(&s.azimuth_deg));
            assert!((-90.0..=90.0).contains(&s.sun_elevation_deg));
            if s.kind == EventKind::Peak {
                assert!(s.elevation_deg >= 10.0);
            }
        }
    }

    #[test]
    fn test_unknown_satellite() {
        let (_dir, tles) = loader();
        let geometry = Sgp4Geometry::new(&tles, 40.0, 10.0);
        let satellite = Satellite {
            name: "NOT IN CATALOG".into(),
            frequency_mhz: 145.8,
        };
        let window = Window::new(iss_epoch(), Duration::hours(8)).unwrap();
        assert!(matches!(
            geometry.samples(&satellite, &station(), &window),
            Err(PredictError::UnknownSatellite(_))
        ));
    }
}
