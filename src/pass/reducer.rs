use crate::pass::sample::{EventKind, GeometrySample, PassTriple};

/// Where the reducer is within a pass, carrying the samples seen so far.
#[derive(Debug, Clone, Default)]
enum ReducerState {
    #[default]
    ExpectingRise,
    ExpectingPeak {
        rise: GeometrySample,
    },
    ExpectingSet {
        rise: GeometrySample,
        peak: GeometrySample,
    },
}

/// Folds one pair's chronological event stream into complete passes.
///
/// Any sample whose kind is not the one expected next forfeits the pass in
/// progress, and that sample is dropped too: a stray Rise while waiting for a
/// Peak does not open a new pass.
#[derive(Debug, Default)]
pub struct PassReducer {
    state: ReducerState,
}

impl PassReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next sample; returns a triple when it completes one.
    pub fn push(&mut self, sample: GeometrySample) -> Option<PassTriple> {
        let state = std::mem::take(&mut self.state);

        match (state, sample.kind) {
            (ReducerState::ExpectingRise, EventKind::Rise) => {
                self.state = ReducerState::ExpectingPeak { rise: sample };
                None
            }
            (ReducerState::ExpectingPeak { rise }, EventKind::Peak) => {
                self.state = ReducerState::ExpectingSet { rise, peak: sample };
                None
            }
            (ReducerState::ExpectingSet { rise, peak }, EventKind::Set) => Some(PassTriple {
                rise,
                peak,
                set: sample,
            }),
            (_, kind) => {
                log::debug!("discarding partial pass at unexpected {} event", kind);
                None
            }
        }
    }

    /// True while no pass is in progress.
    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ReducerState::ExpectingRise)
    }
}

/// Reduce a whole stream with a fresh reducer.
pub fn reduce<I>(samples: I) -> Vec<PassTriple>
where
    I: IntoIterator<Item = GeometrySample>,
{
    let mut reducer = PassReducer::new();
    samples
        .into_iter()
        .filter_map(|sample| reducer.push(sample))
        .collect()
}
