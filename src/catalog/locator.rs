//! Maidenhead grid locators ("JO32kf") to geographic coordinates.

use crate::catalog::types::GeoPosition;

/// Size in degrees (longitude, latitude) of each locator pair.
const PAIR_SIZE_DEG: [(f64, f64); 4] = [
    (20.0, 10.0),
    (2.0, 1.0),
    (5.0 / 60.0, 2.5 / 60.0),
    (0.5 / 60.0, 0.25 / 60.0),
];

/// Decode a 2, 4, 6 or 8 character locator.
///
/// Returns the south-west corner of the square, or its centre when `center`
/// is set. `None` if the locator is malformed.
pub fn locator_to_position(locator: &str, center: bool) -> Option<GeoPosition> {
    let chars: Vec<char> = locator.trim().chars().collect();
    if chars.is_empty() || chars.len() % 2 != 0 || chars.len() > 8 {
        return None;
    }

    let mut lon = -180.0;
    let mut lat = -90.0;
    let pairs = chars.len() / 2;

    for (i, pair) in chars.chunks(2).enumerate() {
        let (lon_size, lat_size) = PAIR_SIZE_DEG[i];
        let (x, y) = match i {
            0 => (letter(pair[0], 'R')?, letter(pair[1], 'R')?),
            2 => (letter(pair[0], 'X')?, letter(pair[1], 'X')?),
            _ => (digit(pair[0])?, digit(pair[1])?),
        };
        lon += x * lon_size;
        lat += y * lat_size;
    }

    if center {
        let (lon_size, lat_size) = PAIR_SIZE_DEG[pairs - 1];
        lon += lon_size / 2.0;
        lat += lat_size / 2.0;
    }

    Some(GeoPosition {
        latitude_deg: lat,
        longitude_deg: lon,
    })
}

fn letter(c: char, last: char) -> Option<f64> {
    let c = c.to_ascii_uppercase();
    ('A'..=last)
        .contains(&c)
        .then(|| f64::from(c as u8 - b'A'))
}

fn digit(c: char) -> Option<f64> {
    c.to_digit(10).map(f64::from)
}
