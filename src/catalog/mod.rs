mod error;
mod locator;
mod satellites;
mod stations;
mod types;

pub use error::CatalogError;
pub use satellites::load_satellites;
pub use stations::load_stations;
pub use types::{FrequencyBand, GeoPosition, Satellite, Station};
