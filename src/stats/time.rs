use crate::loader::TripDataset;
use crate::stats::utility::mode;

/// Most frequent start month, weekday and hour, as raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    /// 1 = January.
    pub month: Option<u32>,
    /// 0 = Monday.
    pub day_of_week: Option<u32>,
    pub hour: Option<u32>,
}

impl TimeStats {
    pub fn from_dataset(data: &TripDataset) -> Self {
        Self {
            month: mode(data.trips.iter().map(|t| t.month)),
            day_of_week: mode(data.trips.iter().map(|t| t.day_of_week)),
            hour: mode(data.trips.iter().map(|t| t.hour)),
        }
    }
}
