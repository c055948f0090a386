use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::types::SatelliteInfo;

pub struct TleEntry {
    pub info: SatelliteInfo,
    pub elements: Elements,
    pub constants: Constants,
}

/// Element sets read from a folder of TLE files, looked up by satellite name
/// or NORAD id.
pub struct TleLoader {
    tle_dir: PathBuf,
    satellites: HashMap<u32, TleEntry>,
    by_name: HashMap<String, u32>,
}

impl TleLoader {
    pub fn new(tle_dir: PathBuf) -> Self {
        Self {
            tle_dir,
            satellites: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Load all TLE files from the directory. Files are read in name order,
    /// so a later file wins when two list the same satellite.
    pub fn load_all(&mut self) -> Result<(), PredictError> {
        if !self.tle_dir.exists() {
            return Err(PredictError::DirectoryNotFound(
                self.tle_dir.display().to_string(),
            ));
        }

        self.satellites.clear();
        self.by_name.clear();

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.tle_dir)? {
            let path = entry?.path();
            let is_tle = path
                .extension()
                .is_some_and(|ext| ext == "tle" || ext == "txt");
            if path.is_file() && is_tle {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            match self.parse_tle_file(&path) {
                Ok(entries) => {
                    for tle_entry in entries {
                        self.insert(tle_entry);
                    }
                }
                Err(e) => {
                    log::warn!("Failed to parse TLE file {}: {}", path.display(), e);
                    // Continue with other files
                }
            }
        }

        log::info!(
            "Loaded {} element sets from {}",
            self.satellites.len(),
            self.tle_dir.display()
        );
        Ok(())
    }

    fn insert(&mut self, entry: TleEntry) {
        let norad_id = entry.info.norad_id;
        self.by_name.insert(entry.info.name.clone(), norad_id);
        self.satellites.insert(norad_id, entry);
    }

    /// Parse a single TLE file (may contain multiple satellites)
    fn parse_tle_file(&self, path: &Path) -> Result<Vec<TleEntry>, PredictError> {
        let content = fs::read_to_string(path)?;
        let filename = path.file_name().unwrap_or_default().to_string_lossy().to_string();
        parse_tle_content(&content, &filename)
    }

    /// Element set for a satellite name as written in the TLE name line, or
    /// for a NORAD catalog number.
    pub fn get(&self, name: &str) -> Option<&TleEntry> {
        let name = name.trim();
        match self.by_name.get(name) {
            Some(id) => self.satellites.get(id),
            None => name.parse::<u32>().ok().and_then(|id| self.satellites.get(&id)),
        }
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}

/// Parse every set in a TLE list. A set that does not parse is skipped with
/// a warning; the file only fails when it has sets and none of them parse.
fn parse_tle_content(content: &str, source: &str) -> Result<Vec<TleEntry>, PredictError> {
    let mut results = Vec::new();
    let mut last_error = None;

    for (name, line1, line2) in parse_multi_tle(content) {
        match parse_set(name, &line1, &line2, source) {
            Ok(entry) => results.push(entry),
            Err(e) => {
                log::warn!("Skipping element set: {}", e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if results.is_empty() => Err(e),
        _ => Ok(results),
    }
}

fn parse_set(
    name: Option<String>,
    line1: &str,
    line2: &str,
    source: &str,
) -> Result<TleEntry, PredictError> {
    let invalid = |message: String| PredictError::InvalidTle {
        file: source.to_string(),
        message: match &name {
            Some(name) => format!("{name}: {message}"),
            None => message,
        },
    };

    let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
        .map_err(|e| invalid(e.to_string()))?;
    let constants = Constants::from_elements(&elements).map_err(|e| invalid(e.to_string()))?;

    let sat_name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

    Ok(TleEntry {
        info: SatelliteInfo {
            name: sat_name,
            norad_id: elements.norad_id as u32,
            tle_source: source.to_string(),
        },
        elements,
        constants,
    })
}

/// Split a TLE list into (optional name, line 1, line 2) sets. Lines that
/// belong to no set are skipped.
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut sets = Vec::new();
    let mut rest = lines.as_slice();

    loop {
        match rest {
            [l1, l2, tail @ ..] if l1.starts_with("1 ") && l2.starts_with("2 ") => {
                sets.push((None, l1.to_string(), l2.to_string()));
                rest = tail;
            }
            [name, l1, l2, tail @ ..] if l1.starts_with("1 ") && l2.starts_with("2 ") => {
                sets.push((Some(name.to_string()), l1.to_string(), l2.to_string()));
                rest = tail;
            }
            [skipped, tail @ ..] => {
                log::debug!("skipping TLE line '{}'", skipped);
                rest = tail;
            }
            [] => break,
        }
    }

    sets
}
