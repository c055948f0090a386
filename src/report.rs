use std::fmt::Write;

use chrono::FixedOffset;

use crate::pass::{GeometrySample, QualifiedPass};

const SEPARATOR: &str = "----------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

pub fn render(passes: &[QualifiedPass], format: Format, offset: FixedOffset) -> String {
    match format {
        Format::Text => render_text(passes, offset),
        Format::Json => render_json(passes),
    }
}

/// One block per pass: satellite, station, then the rise, peak and set lines
/// in the configured local time (`offset`).
pub fn render_text(passes: &[QualifiedPass], offset: FixedOffset) -> String {
    let mut out = String::new();
    for p in passes {
        let _ = writeln!(out, "{SEPARATOR}");
        let _ = writeln!(out, "{}, {:?}MHz", p.satellite.name, p.satellite.frequency_mhz);
        let _ = writeln!(out, "{}", p.station.name);
        let _ = writeln!(out, "{}", p.station.url);
        for sample in p.pass.samples() {
            let _ = writeln!(out, "{}", sample_line(sample, offset));
        }
    }
    out
}

fn sample_line(sample: &GeometrySample, offset: FixedOffset) -> String {
    format!(
        "{}, {:.1}, {:.1}, {:.1}",
        sample.timestamp.with_timezone(&offset).format("%y/%m/%d %H:%M:%S"),
        sample.elevation_deg,
        sample.azimuth_deg,
        sample.range_km
    )
}

pub fn render_json(passes: &[QualifiedPass]) -> String {
    // Plain data records; serialization cannot fail.
    serde_json::to_string_pretty(passes).unwrap_or_else(|_| "[]".to_string())
}
