use crate::loader::TripDataset;
use crate::stats::utility::mode;

/// Most used start station, end station and start/end combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Formatted as `"<start> TO <end>"`.
    pub trip: Option<String>,
}

impl StationStats {
    pub fn from_dataset(data: &TripDataset) -> Self {
        Self {
            start_station: mode(data.trips.iter().map(|t| t.start_station.as_str()))
                .map(str::to_string),
            end_station: mode(data.trips.iter().map(|t| t.end_station.as_str()))
                .map(str::to_string),
            trip: mode(data.trips.iter().map(|t| t.route())),
        }
    }
}
