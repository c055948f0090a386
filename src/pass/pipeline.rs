use std::thread;

use crate::catalog::{Satellite, Station};
use crate::pass::matcher::{match_pairs, CandidatePair};
use crate::pass::qualify::{qualify, Thresholds};
use crate::pass::reducer::reduce;
use crate::pass::sample::QualifiedPass;
use crate::pass::schedule::schedule;
use crate::predict::{PassGeometry, PredictError, Window};

/// Run the whole chain for every receivable pair and return the qualified
/// passes ordered by rise time.
///
/// Pairs are independent; they are spread over at most `workers` threads and
/// their results concatenated in pair order before the final sort, so the
/// output does not depend on the thread count.
pub fn find_qualified_passes<G>(
    geometry: &G,
    satellites: &[Satellite],
    stations: &[Station],
    window: &Window,
    thresholds: &Thresholds,
    workers: usize,
) -> Vec<QualifiedPass>
where
    G: PassGeometry + Sync,
{
    let pairs = match_pairs(satellites, stations);
    if pairs.is_empty() {
        log::info!("no satellite is receivable by any station");
        return Vec::new();
    }

    let workers = workers.clamp(1, pairs.len());
    let chunk_size = pairs.len().div_ceil(workers);

    let per_chunk: Vec<Vec<QualifiedPass>> = thread::scope(|scope| {
        let handles: Vec<_> = pairs
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .flat_map(|pair| process_pair(geometry, pair, window, thresholds))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    log::error!("pass worker panicked; its pairs are missing from the report");
                    Vec::new()
                })
            })
            .collect()
    });

    let passes: Vec<QualifiedPass> = per_chunk.into_iter().flatten().collect();
    log::info!(
        "{} candidate pairs, {} qualified passes between {} and {}",
        pairs.len(),
        passes.len(),
        window.start,
        window.end
    );

    schedule(passes)
}

/// Reduce and qualify one pair's event stream. Failures stay local to the pair.
fn process_pair<G>(
    geometry: &G,
    pair: &CandidatePair<'_>,
    window: &Window,
    thresholds: &Thresholds,
) -> Vec<QualifiedPass>
where
    G: PassGeometry + ?Sized,
{
    let samples = match geometry.samples(pair.satellite, pair.station, window) {
        Ok(samples) => samples,
        Err(PredictError::UnknownSatellite(name)) => {
            log::info!("skipping {} at {}: no element set", name, pair.station.name);
            return Vec::new();
        }
        Err(e) => {
            log::warn!("failed to compute passes for {}: {}", pair.label(), e);
            return Vec::new();
        }
    };

    reduce(samples)
        .into_iter()
        .filter_map(|triple| qualify(pair, triple, thresholds))
        .collect()
}
