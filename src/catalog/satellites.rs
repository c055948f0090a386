use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::error::CatalogError;
use crate::catalog::types::Satellite;

/// `NAME,FREQ` where the name runs up to the last comma that is followed by
/// a number.
static SATELLITE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+),([0-9.]+)").expect("valid satellite line pattern"));

pub fn load_satellites(path: &Path) -> Result<Vec<Satellite>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let satellites = parse_satellites(&content)?;
    log::info!(
        "Loaded {} satellites from {}",
        satellites.len(),
        path.display()
    );
    Ok(satellites)
}

/// Parse a satellite list. Lines without a `,FREQ` suffix are skipped.
pub fn parse_satellites(content: &str) -> Result<Vec<Satellite>, CatalogError> {
    let mut satellites = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let Some(caps) = SATELLITE_LINE.captures(line) else {
            if !line.trim().is_empty() {
                log::debug!("satellite list line {} skipped: {:?}", i + 1, line);
            }
            continue;
        };

        let value = &caps[2];
        let frequency_mhz: f64 = value
            .parse()
            .ok()
            .filter(|f: &f64| f.is_finite())
            .ok_or_else(|| CatalogError::InvalidFrequency {
                line: i + 1,
                value: value.to_string(),
            })?;

        satellites.push(Satellite {
            name: caps[1].trim().to_string(),
            frequency_mhz,
        });
    }

    Ok(satellites)
}
