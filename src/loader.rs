//! CSV loading, derived time fields and month/day filtering.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::catalog::CityCatalog;
use crate::filters::{Choice, DayFilter, FilterSelection, MonthFilter};

const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// Timestamp layouts found in the trip files. `%.f` also accepts a missing
/// fraction.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A single row deserialized from a city CSV file.
///
/// Columns not listed here (the unnamed index, `Trip Duration`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type")]
    pub user_type: String,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// A trip with its start time parsed and the derived fields attached.
#[derive(Debug, Clone)]
pub struct Trip {
    pub start: NaiveDateTime,
    /// Parsed on demand by the duration statistics.
    pub end_time: String,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    /// 1 = January.
    pub month: u32,
    /// 0 = Monday … 6 = Sunday.
    pub day_of_week: u32,
    pub hour: u32,
}

impl Trip {
    pub fn from_raw(raw: RawTrip) -> Result<Self> {
        let start = parse_timestamp(&raw.start_time)?;
        Ok(Self {
            month: start.month(),
            day_of_week: start.weekday().num_days_from_monday(),
            hour: start.hour(),
            start,
            end_time: raw.end_time,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: blank_to_none(Some(raw.user_type)),
            gender: blank_to_none(raw.gender),
            birth_year: raw.birth_year,
        })
    }

    /// `"<start> TO <end>"`.
    pub fn route(&self) -> String {
        format!("{} TO {}", self.start_station, self.end_station)
    }

    pub fn end(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.end_time)
    }
}

/// Optional demographic columns present in the source header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    pub gender: bool,
    pub birth_year: bool,
}

/// All trips of one city that survived the filters, in file order.
#[derive(Debug, Clone)]
pub struct TripDataset {
    pub city: String,
    pub columns: Columns,
    pub trips: Vec<Trip>,
}

impl TripDataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Keeps only trips in the given month. `All` leaves the dataset unchanged.
    pub fn filter_month(&mut self, month: MonthFilter) {
        if let Choice::Only(month) = month {
            let number = month.number();
            self.trips.retain(|t| t.month == number);
        }
    }

    /// Keeps only trips whose `day_of_week + 1` equals the day's Sunday-first
    /// index. See [`crate::filters::DayName::filter_index`].
    pub fn filter_day(&mut self, day: DayFilter) {
        if let Choice::Only(day) = day {
            let index = day.filter_index();
            self.trips.retain(|t| t.day_of_week + 1 == index);
        }
    }
}

/// Parses a trip timestamp in any of the supported layouts.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| anyhow!("unrecognized timestamp '{value}'"))
}

/// Reads every trip from `reader`, which must yield CSV with a header row.
pub fn read_trips<R: Read>(city: &str, reader: R) -> Result<TripDataset> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers().context("failed to read CSV header")?;
    let columns = Columns {
        gender: headers.iter().any(|h| h == GENDER_COLUMN),
        birth_year: headers.iter().any(|h| h == BIRTH_YEAR_COLUMN),
    };

    let mut trips = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let raw: RawTrip = result.with_context(|| format!("malformed trip on line {line}"))?;
        let trip = Trip::from_raw(raw).with_context(|| format!("bad start time on line {line}"))?;
        trips.push(trip);
    }

    Ok(TripDataset {
        city: city.to_string(),
        columns,
        trips,
    })
}

/// Loads the selected city's file and applies the month and day filters.
#[tracing::instrument(skip(catalog), fields(city = %selection.city))]
pub fn load_data(catalog: &CityCatalog, selection: &FilterSelection) -> Result<TripDataset> {
    let path = catalog
        .path_for(&selection.city)
        .ok_or_else(|| anyhow!("unknown city '{}'", selection.city))?;

    let mut dataset = load_file(&selection.city, &path)?;
    let loaded = dataset.len();

    dataset.filter_month(selection.month);
    dataset.filter_day(selection.day);

    info!(
        loaded,
        kept = dataset.len(),
        gender = dataset.columns.gender,
        birth_year = dataset.columns.birth_year,
        "Dataset ready"
    );
    if dataset.is_empty() {
        warn!(selection = %selection, "No trips match the selected filters");
    }
    Ok(dataset)
}

fn load_file(city: &str, path: &Path) -> Result<TripDataset> {
    debug!(path = %path.display(), "Opening trip file");
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    read_trips(city, file).with_context(|| format!("failed to load '{}'", path.display()))
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{DayName, Month};
    use std::env;
    use std::fs;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-01-01 09:07:57,2017-01-01 09:20:53,776,Canal St,Clark St,Subscriber,Male,1992.0
2,2017-01-03 17:00:00,2017-01-03 17:01:05,65,Clark St,Canal St,Customer,,
3,2017-01-04 08:30:00,2017-01-04 08:40:00,600,\"State St, North\",Canal St,Subscriber,Female,1985.0
4,2017-02-01 08:00:00,2017-02-01 08:10:00,600,Canal St,Clark St,Subscriber,Male,1970.0
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-03-02 07:00:00,2017-03-02 07:30:00,1800,Union Station,Capitol Hill,Registered
";

    fn chicago() -> TripDataset {
        read_trips("chicago", CHICAGO.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let a = parse_timestamp("2017-01-01 09:07:57").unwrap();
        let b = parse_timestamp("2017-01-01T09:07:57").unwrap();
        let c = parse_timestamp("2017-01-01 09:07:57.250").unwrap();
        assert_eq!(a, b);
        assert_eq!(c.hour(), 9);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_derived_fields_follow_start_time() {
        let data = chicago();
        // 2017-01-01 was a Sunday.
        let first = &data.trips[0];
        assert_eq!((first.month, first.day_of_week, first.hour), (1, 6, 9));
        // 2017-01-03 was a Tuesday.
        let second = &data.trips[1];
        assert_eq!((second.month, second.day_of_week, second.hour), (1, 1, 17));
    }

    #[test]
    fn test_optional_columns_detected_from_header() {
        let data = chicago();
        assert_eq!(data.columns, Columns { gender: true, birth_year: true });
        assert_eq!(data.trips[1].gender, None);
        assert_eq!(data.trips[1].birth_year, None);
        assert_eq!(data.trips[0].birth_year, Some(1992.0));

        let data = read_trips("washington", WASHINGTON.as_bytes()).unwrap();
        assert_eq!(data.columns, Columns::default());
        assert_eq!(data.trips[0].gender, None);
    }

    #[test]
    fn test_quoted_station_names() {
        let data = chicago();
        assert_eq!(data.trips[2].start_station, "State St, North");
        assert_eq!(data.trips[2].route(), "State St, North TO Canal St");
    }

    #[test]
    fn test_month_filter() {
        let mut data = chicago();
        data.filter_month(Choice::Only(Month::January));
        assert_eq!(data.len(), 3);
        assert!(data.trips.iter().all(|t| t.month == 1));

        let mut data = chicago();
        data.filter_month(Choice::Only(Month::February));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_all_filters_are_noops() {
        let mut data = chicago();
        data.filter_month(Choice::All);
        data.filter_day(Choice::All);
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_day_filter_uses_sunday_first_table() {
        // "tuesday" keeps day_of_week == 2, i.e. Wednesdays.
        let mut data = chicago();
        data.filter_day(Choice::Only(DayName::Tuesday));
        let expected: Vec<_> = chicago()
            .trips
            .into_iter()
            .filter(|t| t.day_of_week == 2)
            .map(|t| t.start)
            .collect();
        let kept: Vec<_> = data.trips.iter().map(|t| t.start).collect();
        assert_eq!(kept, expected);
        assert_eq!(kept.len(), 2);

        // "monday" keeps the Tuesday trip.
        let mut data = chicago();
        data.filter_day(Choice::Only(DayName::Monday));
        assert_eq!(data.len(), 1);
        assert_eq!(data.trips[0].start_station, "Clark St");
    }

    #[test]
    fn test_bad_start_time_names_line() {
        let csv = "Start Time,End Time,Start Station,End Station,User Type\nnot a date,x,a,b,c\n";
        let err = read_trips("x", csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let csv = "Start Time,End Time,Start Station\n2017-01-01 00:00:00,2017-01-01 00:01:00,a\n";
        assert!(read_trips("x", csv.as_bytes()).is_err());

        let csv = "\
Start Time,End Time,Start Station,End Station,Gender
2017-01-01 00:00:00,2017-01-01 00:01:00,a,b,Male
";
        let err = read_trips("x", csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_blank_user_type_is_none() {
        let csv = "\
Start Time,End Time,Start Station,End Station,User Type
2017-01-01 00:00:00,2017-01-01 00:01:00,a,b,
2017-01-01 00:00:00,2017-01-01 00:01:00,a,b,Customer
";
        let data = read_trips("x", csv.as_bytes()).unwrap();
        assert_eq!(data.trips[0].user_type, None);
        assert_eq!(data.trips[1].user_type.as_deref(), Some("Customer"));
    }

    #[test]
    fn test_load_data_missing_file() {
        let catalog = CityCatalog::new(env::temp_dir().join("bikeshare_no_such_dir"));
        let selection = FilterSelection {
            city: "chicago".into(),
            month: Choice::All,
            day: Choice::All,
        };
        let err = load_data(&catalog, &selection).unwrap_err();
        assert!(format!("{err:#}").contains("chicago.csv"));
    }

    #[test]
    fn test_load_data_reads_and_filters_file() {
        let dir = env::temp_dir().join("bikeshare_loader_test_load");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("chicago.csv"), CHICAGO).unwrap();

        let catalog = CityCatalog::new(&dir);
        let selection = FilterSelection {
            city: "chicago".into(),
            month: Choice::Only(Month::January),
            day: Choice::All,
        };
        let data = load_data(&catalog, &selection).unwrap();
        assert_eq!(data.city, "chicago");
        assert_eq!(data.len(), 3);

        fs::remove_dir_all(&dir).unwrap();
    }
}
