mod matcher;
mod pipeline;
mod qualify;
mod reducer;
mod sample;
mod schedule;

pub use matcher::{match_pairs, CandidatePair};
pub use pipeline::find_qualified_passes;
pub use qualify::Thresholds;
pub use sample::{EventKind, GeometrySample, PassTriple, QualifiedPass};
