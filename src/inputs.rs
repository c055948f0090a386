use crate::catalog::{load_satellites, load_stations, CatalogError, Satellite, Station};
use crate::config::Config;
use crate::pass::{find_qualified_passes, match_pairs, CandidatePair, QualifiedPass};
use crate::predict::{Sgp4Geometry, TleLoader, Window};

/// Everything a run reads from disk: the satellite list, the station list and
/// the TLE catalog.
pub struct Inputs {
    pub satellites: Vec<Satellite>,
    pub stations: Vec<Station>,
    pub tles: TleLoader,
}

impl Inputs {
    /// Catalog errors abort the run. A missing or unreadable TLE folder only
    /// leaves the element-set catalog empty; every pair then reports an
    /// unknown satellite.
    pub fn load(config: &Config) -> Result<Self, CatalogError> {
        let satellites = load_satellites(&config.satellites)?;
        let stations = load_stations(&config.stations, config.locator_center)?;

        let mut tles = TleLoader::new(config.tle.folder.clone());
        if let Err(e) = tles.load_all() {
            log::warn!("No element sets available: {}", e);
        }

        Ok(Self {
            satellites,
            stations,
            tles,
        })
    }

    pub fn pairs(&self) -> Vec<CandidatePair<'_>> {
        match_pairs(&self.satellites, &self.stations)
    }

    /// Qualified passes over `window`, with events detected above
    /// `min_elevation_deg`.
    pub fn passes(
        &self,
        config: &Config,
        window: &Window,
        min_elevation_deg: f64,
    ) -> Vec<QualifiedPass> {
        let geometry = Sgp4Geometry::new(&self.tles, min_elevation_deg, config.station_altitude_m);
        find_qualified_passes(
            &geometry,
            &self.satellites,
            &self.stations,
            window,
            &config.qualification,
            config.workers,
        )
    }
}
