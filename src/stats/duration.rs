use anyhow::{Context, Result};

use crate::loader::TripDataset;
use crate::stats::utility::mean;

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: Option<f64>,
}

impl DurationStats {
    /// Parses every end time and subtracts the start time. Negative or zero
    /// durations are kept as they are.
    pub fn from_dataset(data: &TripDataset) -> Result<Self> {
        let mut durations = Vec::with_capacity(data.len());
        for trip in &data.trips {
            let end = trip
                .end()
                .with_context(|| format!("bad end time for trip starting {}", trip.start))?;
            let millis = (end - trip.start).num_milliseconds();
            durations.push(millis as f64 / 1000.0);
        }

        Ok(Self {
            total_seconds: durations.iter().sum(),
            mean_seconds: mean(&durations),
        })
    }
}

/// Formats seconds as `M:SS`, truncating both parts toward zero. A negative
/// value carries its sign once, in front: `-65.0` is `-1:05`.
pub fn format_minutes_seconds(seconds: f64) -> String {
    let magnitude = seconds.abs();
    let minutes = (magnitude / 60.0).trunc() as i64;
    let rest = (magnitude % 60.0).trunc() as i64;
    let sign = if seconds < 0.0 && (minutes, rest) != (0, 0) { "-" } else { "" };
    format!("{sign}{minutes}:{rest:02}")
}
