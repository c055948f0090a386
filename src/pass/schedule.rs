use crate::pass::sample::QualifiedPass;

/// Order passes by rise time. The sort is stable, so passes rising at the
/// same instant keep their arrival order.
pub fn schedule(mut passes: Vec<QualifiedPass>) -> Vec<QualifiedPass> {
    passes.sort_by_key(|p| p.start());
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GeoPosition, Satellite, Station};
    use crate::pass::sample::fixtures::{at, sample};
    use crate::pass::sample::{EventKind, PassTriple};

    fn pass(satellite: &str, hour: u32, minute: u32) -> QualifiedPass {
        let rise = at(hour, minute);
        QualifiedPass {
            satellite: Satellite {
                name: satellite.into(),
                frequency_mhz: 145.0,
            },
            station: Station {
                name: "x".into(),
                url: String::new(),
                position: GeoPosition {
                    latitude_deg: 0.0,
                    longitude_deg: 0.0,
                },
                bands: Vec::new(),
            },
            pass: PassTriple {
                rise: sample(EventKind::Rise, rise),
                peak: sample(EventKind::Peak, rise + chrono::Duration::minutes(4)),
                set: sample(EventKind::Set, rise + chrono::Duration::minutes(8)),
            },
        }
    }

    fn order(passes: &[QualifiedPass]) -> Vec<&str> {
        passes.iter().map(|p| p.satellite.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_rise_time() {
        let passes = vec![pass("c", 13, 0), pass("a", 9, 30), pass("b", 11, 15)];
        let scheduled = schedule(passes);
        assert_eq!(order(&scheduled), vec!["a", "b", "c"]);
        assert!(scheduled.windows(2).all(|w| w[0].start() <= w[1].start()));
    }

    #[test]
    fn test_equal_rise_times_keep_arrival_order() {
        let passes = vec![
            pass("late", 12, 0),
            pass("first", 10, 0),
            pass("second", 10, 0),
            pass("third", 10, 0),
        ];
        let scheduled = schedule(passes);
        assert_eq!(order(&scheduled), vec!["first", "second", "third", "late"]);
    }

    #[test]
    fn test_empty_schedule() {
        assert!(schedule(Vec::new()).is_empty());
    }
}
