use chrono::{DateTime, Duration, Utc};
use sgp4::{Constants, Elements};

use crate::pass::EventKind;
use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::propagation::{look_angles, propagate};
use crate::predict::types::Window;

const COARSE_STEP_SECONDS: i64 = 20; // short enough not to miss high, brief passes
const FINE_STEP_SECONDS: i64 = 1;

/// Find rise, peak and set events of a satellite above `min_elevation`.
///
/// Rise and set are the threshold crossings; a peak is every elevation
/// maximum at or above the threshold. A pass already up at the window start
/// has no rise, one still up at the end has no set. Events are chronological.
pub fn find_events(
    station: &GroundStation,
    elements: &Elements,
    constants: &Constants,
    window: &Window,
    min_elevation: f64,
) -> Result<Vec<(DateTime<Utc>, EventKind)>, PredictError> {
    let elevation = |t: DateTime<Utc>| -> Result<f64, PredictError> {
        let state = propagate(elements, constants, t)?;
        Ok(look_angles(station, &state).elevation_deg)
    };

    let coarse_step = Duration::seconds(COARSE_STEP_SECONDS);
    let mut grid = Vec::new();
    let mut cursor = window.start;
    while cursor < window.end {
        grid.push((cursor, elevation(cursor)?));
        cursor += coarse_step;
    }
    grid.push((window.end, elevation(window.end)?));

    let mut events = Vec::new();

    for pair in grid.windows(2) {
        let (t0, el0) = pair[0];
        let (t1, el1) = pair[1];
        let above0 = el0 >= min_elevation;
        let above1 = el1 >= min_elevation;

        if !above0 && above1 {
            let t = refine_crossing(&elevation, t0, t1, min_elevation, true)?;
            events.push((t, EventKind::Rise));
        } else if above0 && !above1 {
            let t = refine_crossing(&elevation, t0, t1, min_elevation, false)?;
            events.push((t, EventKind::Set));
        }
    }

    for triple in grid.windows(3) {
        let (before, el_before) = triple[0];
        let (_, el_mid) = triple[1];
        let (after, el_after) = triple[2];

        if el_mid >= el_before && el_mid > el_after {
            let (t, el) = refine_maximum(&elevation, before, after)?;
            if el >= min_elevation {
                events.push((t, EventKind::Peak));
            }
        }
    }

    events.sort_by_key(|(t, _)| *t);
    Ok(events)
}

/// Binary search to find exact threshold crossing time
fn refine_crossing<F>(
    elevation: &F,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    threshold: f64,
    rising: bool,
) -> Result<DateTime<Utc>, PredictError>
where
    F: Fn(DateTime<Utc>) -> Result<f64, PredictError>,
{
    let mut low = before;
    let mut high = after;

    while high - low > Duration::seconds(FINE_STEP_SECONDS) {
        let mid = low + (high - low) / 2;
        let above = elevation(mid)? >= threshold;
        if above == rising {
            high = mid;
        } else {
            low = mid;
        }
    }

    Ok(high)
}

/// Ternary search for the elevation maximum inside a bracket.
fn refine_maximum<F>(
    elevation: &F,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
) -> Result<(DateTime<Utc>, f64), PredictError>
where
    F: Fn(DateTime<Utc>) -> Result<f64, PredictError>,
{
    let mut low = before;
    let mut high = after;

    while high - low > Duration::seconds(2 * FINE_STEP_SECONDS) {
        let third = (high - low) / 3;
        let m1 = low + third;
        let m2 = high - third;
        if elevation(m1)? < elevation(m2)? {
            low = m1;
        } else {
            high = m2;
        }
    }

    let best = low + (high - low) / 2;
    Ok((best, elevation(best)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GeoPosition;
    use crate::predict::propagation::fixtures::{iss, iss_epoch};

    fn philadelphia() -> GroundStation {
        GroundStation::new(
            GeoPosition {
                latitude_deg: 40.0,
                longitude_deg: -75.0,
            },
            10.0,
        )
    }

    fn day_events(min_elevation: f64) -> Vec<(DateTime<Utc>, EventKind)> {
        let (elements, constants) = iss();
        let window = Window::new(iss_epoch(), Duration::days(1)).unwrap();
        find_events(&philadelphia(), &elements, &constants, &window, min_elevation).unwrap()
    }

    fn elevation_at(t: DateTime<Utc>) -> f64 {
        let (elements, constants) = iss();
        let state = propagate(&elements, &constants, t).unwrap();
        look_angles(&philadelphia(), &state).elevation_deg
    }

    #[test]
    fn test_events_are_chronological_and_complete() {
        let events = day_events(10.0);
        assert!(!events.is_empty(), "ISS should pass over in a day");
        assert!(events.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(events.iter().any(|(_, k)| *k == EventKind::Rise));
        assert!(events.iter().any(|(_, k)| *k == EventKind::Peak));
        assert!(events.iter().any(|(_, k)| *k == EventKind::Set));
    }

    #[test]
    fn test_event_elevations_match_threshold() {
        for (t, kind) in day_events(10.0) {
            let el = elevation_at(t);
            match kind {
                EventKind::Peak => {
                    assert!(el >= 10.0, "peak at {t} only {el}");
                    let neighbours = [t - Duration::seconds(30), t + Duration::seconds(30)];
                    assert!(neighbours.iter().all(|n| elevation_at(*n) <= el));
                }
                _ => assert!((el - 10.0).abs() < 1.0, "{kind} at {t}: {el}"),
            }
        }
    }

    #[test]
    fn test_higher_threshold_gives_fewer_events() {
        let low = day_events(10.0);
        let high = day_events(40.0);
        assert!(high.len() <= low.len());
    }

    #[test]
    fn test_refine_crossing_on_linear_profile() {
        let start = iss_epoch();
        let profile = |t: DateTime<Utc>| -> Result<f64, PredictError> {
            Ok((t - start).num_milliseconds() as f64 / 1000.0)
        };
        let t = refine_crossing(&profile, start, start + Duration::seconds(20), 7.5, true).unwrap();
        let offset = (t - start).num_milliseconds() as f64 / 1000.0;
        assert!((7.5..=8.5).contains(&offset), "{offset}");

        let falling = |t: DateTime<Utc>| -> Result<f64, PredictError> {
            Ok(20.0 - (t - start).num_milliseconds() as f64 / 1000.0)
        };
        let t = refine_crossing(&falling, start, start + Duration::seconds(20), 12.5, false).unwrap();
        let offset = (t - start).num_milliseconds() as f64 / 1000.0;
        assert!((7.5..=8.5).contains(&offset), "{offset}");
    }

    #[test]
    fn test_refine_maximum_on_parabola() {
        let start = iss_epoch();
        let profile = |t: DateTime<Utc>| -> Result<f64, PredictError> {
            let x = (t - start).num_milliseconds() as f64 / 1000.0 - 13.0;
            Ok(50.0 - x * x)
        };
        let (t, el) = refine_maximum(&profile, start, start + Duration::seconds(40)).unwrap();
        let offset = (t - start).num_milliseconds() as f64 / 1000.0;
        assert!((offset - 13.0).abs() <= 2.0, "{offset}");
        assert!(el > 45.0);
    }
}
