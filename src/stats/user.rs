use crate::loader::TripDataset;
use crate::stats::utility::{mode, value_counts};

/// Earliest, latest and most common birth year, truncated to whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: Option<i64>,
    pub most_recent: Option<i64>,
    pub most_common: Option<i64>,
}

/// Rider breakdowns. `gender` and `birth_year` are `None` when the city's
/// file has no such column.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub gender: Option<Vec<(String, usize)>>,
    pub birth_year: Option<BirthYearStats>,
}

impl UserStats {
    pub fn from_dataset(data: &TripDataset) -> Self {
        let user_types = owned(value_counts(
            data.trips.iter().filter_map(|t| t.user_type.as_deref()),
        ));

        let gender = data
            .columns
            .gender
            .then(|| owned(value_counts(data.trips.iter().filter_map(|t| t.gender.as_deref()))));

        let birth_year = data.columns.birth_year.then(|| birth_years(data));

        Self {
            user_types,
            gender,
            birth_year,
        }
    }
}

fn birth_years(data: &TripDataset) -> BirthYearStats {
    let years: Vec<f64> = data.trips.iter().filter_map(|t| t.birth_year).collect();

    let earliest = years.iter().copied().reduce(f64::min).map(|y| y as i64);
    let most_recent = years.iter().copied().reduce(f64::max).map(|y| y as i64);
    // f64 is not Hash; count on the bit pattern.
    let most_common =
        mode(years.iter().map(|y| y.to_bits())).map(|bits| f64::from_bits(bits) as i64);

    BirthYearStats {
        earliest,
        most_recent,
        most_common,
    }
}

fn owned(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts.into_iter().map(|(k, n)| (k.to_string(), n)).collect()
}
