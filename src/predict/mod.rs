mod error;
mod fetch;
mod geometry;
mod ground_station;
mod pass_finder;
mod propagation;
mod sun;
mod tle_loader;
mod types;

pub use error::PredictError;
pub use fetch::fetch_tle_files;
pub use geometry::{PassGeometry, Sgp4Geometry};
pub use tle_loader::TleLoader;
pub use types::{Window, MAX_WINDOW_DAYS};
