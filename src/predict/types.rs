use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::error::PredictError;

/// Longest look-ahead accepted; the event finder samples every 20 s.
pub const MAX_WINDOW_DAYS: i64 = 30;

/// Information about a single satellite from TLE
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteInfo {
    pub name: String,
    pub norad_id: u32,
    pub tle_source: String,
}

/// Look-ahead interval searched for passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn new(start: DateTime<Utc>, length: Duration) -> Result<Self, PredictError> {
        if length <= Duration::zero() || length > Duration::days(MAX_WINDOW_DAYS) {
            return Err(PredictError::InvalidWindow(format!(
                "length must be positive and at most {MAX_WINDOW_DAYS} days"
            )));
        }
        let end = start
            .checked_add_signed(length)
            .ok_or_else(|| PredictError::InvalidWindow(format!("{start} + {length} overflows")))?;
        Ok(Self { start, end })
    }

    pub fn starting_now(length: Duration) -> Result<Self, PredictError> {
        Self::new(Utc::now(), length)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_window_bounds() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let window = Window::new(start, Duration::hours(8)).unwrap();
        assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap());
        assert!(Window::new(start, Duration::days(MAX_WINDOW_DAYS)).is_ok());

        for length in [
            Duration::zero(),
            Duration::seconds(-1),
            Duration::days(MAX_WINDOW_DAYS) + Duration::seconds(1),
            Duration::MAX,
        ] {
            assert!(
                matches!(Window::new(start, length), Err(PredictError::InvalidWindow(_))),
                "{length}"
            );
        }
    }

    #[test]
    fn test_window_end_overflow_is_an_error() {
        let start = DateTime::<Utc>::MAX_UTC - Duration::hours(1);
        assert!(matches!(
            Window::new(start, Duration::hours(2)),
            Err(PredictError::InvalidWindow(_))
        ));
    }
}
