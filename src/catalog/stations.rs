use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::error::CatalogError;
use crate::catalog::locator::locator_to_position;
use crate::catalog::types::{FrequencyBand, GeoPosition, Station};

const RECORD_SEPARATOR: &str = "------------";

static BAND_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-0-9.]+) - ([0-9.]+) MHz").expect("valid band line pattern"));

/// Fields collected for the record currently being read.
#[derive(Default)]
struct RecordBuilder {
    start_line: usize,
    /// Lines seen since the separator, counting the separator itself.
    lines: usize,
    has_content: bool,
    name: String,
    url: String,
    position: Option<GeoPosition>,
    bands: Vec<FrequencyBand>,
}

impl RecordBuilder {
    fn starting_at(start_line: usize) -> Self {
        Self {
            start_line,
            ..Self::default()
        }
    }

    /// A record needs name, URL, locator and at least one more line.
    fn finish(self) -> Option<Station> {
        if self.lines <= 4 {
            return None;
        }
        let position = self.position?;
        if self.bands.is_empty() {
            log::debug!("station {} lists no receive bands", self.name);
        }
        Some(Station {
            name: self.name,
            url: self.url,
            position,
            bands: self.bands,
        })
    }
}

pub fn load_stations(path: &Path, locator_center: bool) -> Result<Vec<Station>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let stations = parse_stations(&content, locator_center)?;
    log::info!("Loaded {} stations from {}", stations.len(), path.display());
    Ok(stations)
}

/// Parse station records separated by `------------` lines.
///
/// Inside a record: name, URL, grid locator, then free text in which
/// `MIN - MAX MHz` lines declare receive bands.
pub fn parse_stations(content: &str, locator_center: bool) -> Result<Vec<Station>, CatalogError> {
    let mut stations = Vec::new();
    let mut record = RecordBuilder::starting_at(1);

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim_end();

        if line.contains(RECORD_SEPARATOR) {
            let finished = std::mem::replace(&mut record, RecordBuilder::starting_at(line_no + 1));
            if let Some(station) = finished.finish() {
                stations.push(station);
            }
            record.lines = 1;
            continue;
        }

        if !line.trim().is_empty() {
            record.has_content = true;
        }

        match record.lines {
            0 => {}
            1 => record.name = line.trim().to_string(),
            2 => record.url = line.trim().to_string(),
            3 => {
                let position = locator_to_position(line, locator_center).ok_or_else(|| {
                    CatalogError::InvalidLocator {
                        line: line_no,
                        locator: line.trim().to_string(),
                    }
                })?;
                record.position = Some(position);
            }
            _ => {
                if let Some(band) = parse_band(line, line_no)? {
                    record.bands.push(band);
                }
            }
        }
        record.lines += 1;
    }

    if record.has_content {
        return Err(CatalogError::UnterminatedRecord {
            line: record.start_line,
        });
    }

    Ok(stations)
}

/// `Ok(None)` for lines that are not band declarations.
fn parse_band(line: &str, line_no: usize) -> Result<Option<FrequencyBand>, CatalogError> {
    let Some(caps) = BAND_LINE.captures(line) else {
        return Ok(None);
    };

    let malformed = || CatalogError::MalformedBand {
        line: line_no,
        text: line.trim().to_string(),
    };
    let min: f64 = caps[1].parse().map_err(|_| malformed())?;
    let max: f64 = caps[2].parse().map_err(|_| malformed())?;
    if !min.is_finite() || !max.is_finite() || min < 0.0 {
        return Err(malformed());
    }
    if min > max {
        return Err(CatalogError::InvertedBand {
            line: line_no,
            min,
            max,
        });
    }

    Ok(Some(FrequencyBand::new(min, max)))
}
