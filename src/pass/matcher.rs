use crate::catalog::{Satellite, Station};

/// A satellite together with a station able to receive its beacon.
#[derive(Debug, Clone, Copy)]
pub struct CandidatePair<'a> {
    pub satellite: &'a Satellite,
    pub station: &'a Station,
}

impl CandidatePair<'_> {
    pub fn label(&self) -> String {
        format!("{} @ {}", self.satellite.name, self.station.name)
    }
}

/// Pair every satellite with each station that has a band covering its
/// beacon frequency. A station appears at most once per satellite; output
/// follows satellite order, then station order.
pub fn match_pairs<'a>(satellites: &'a [Satellite], stations: &'a [Station]) -> Vec<CandidatePair<'a>> {
    let mut pairs = Vec::new();

    for satellite in satellites {
        let before = pairs.len();
        for station in stations {
            if station.receives(satellite.frequency_mhz) {
                pairs.push(CandidatePair { satellite, station });
            }
        }
        if pairs.len() == before {
            log::debug!(
                "no station receives {} on {} MHz",
                satellite.name,
                satellite.frequency_mhz
            );
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FrequencyBand, GeoPosition};

    fn satellite(name: &str, frequency_mhz: f64) -> Satellite {
        Satellite {
            name: name.into(),
            frequency_mhz,
        }
    }

    fn station(name: &str, bands: &[(f64, f64)]) -> Station {
        Station {
            name: name.into(),
            url: format!("http://{name}.example/"),
            position: GeoPosition {
                latitude_deg: 35.0,
                longitude_deg: 139.0,
            },
            bands: bands
                .iter()
                .map(|(min, max)| FrequencyBand::new(*min, *max))
                .collect(),
        }
    }

    fn names(pairs: &[CandidatePair<'_>]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|p| (p.satellite.name.clone(), p.station.name.clone()))
            .collect()
    }

    #[test]
    fn test_band_bounds_are_inclusive() {
        let stations = vec![station("x", &[(144.0, 146.0)])];
        for f in [144.0, 145.0, 146.0] {
            let sats = vec![satellite("a", f)];
            assert_eq!(match_pairs(&sats, &stations).len(), 1, "f = {f}");
        }
        for f in [143.999, 146.001, 0.0] {
            let sats = vec![satellite("a", f)];
            assert!(match_pairs(&sats, &stations).is_empty(), "f = {f}");
        }
    }

    #[test]
    fn test_station_listed_once_when_several_bands_match() {
        let sats = vec![satellite("a", 145.0)];
        let stations = vec![station("x", &[(144.0, 146.0), (100.0, 200.0), (145.0, 145.0)])];
        let pairs = match_pairs(&sats, &stations);
        assert_eq!(names(&pairs), vec![("a".into(), "x".into())]);
    }

    #[test]
    fn test_pairs_follow_input_order() {
        let sats = vec![satellite("a", 145.0), satellite("b", 437.5), satellite("c", 2400.0)];
        let stations = vec![
            station("x", &[(0.0, 30.0), (144.0, 146.0)]),
            station("y", &[(430.0, 440.0)]),
            station("z", &[(140.0, 150.0), (435.0, 438.0)]),
        ];
        let pairs = match_pairs(&sats, &stations);
        assert_eq!(
            names(&pairs),
            vec![
                ("a".into(), "x".into()),
                ("a".into(), "z".into()),
                ("b".into(), "y".into()),
                ("b".into(), "z".into()),
            ]
        );
    }

    #[test]
    fn test_unreceivable_satellite_contributes_nothing() {
        let sats = vec![satellite("a", 10_000.0)];
        let stations = vec![station("x", &[(144.0, 146.0)]), station("y", &[])];
        assert!(match_pairs(&sats, &stations).is_empty());
        assert!(match_pairs(&[], &stations).is_empty());
        assert!(match_pairs(&sats, &[]).is_empty());
    }
}
