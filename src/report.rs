//! Terminal rendering of the four statistics groups.
//!
//! Every reporter prints a heading, the figures, how long the computation
//! took, and a dash rule.

use anyhow::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::debug;

use crate::console::Console;
use crate::loader::TripDataset;
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats, format_minutes_seconds};

/// Printed in place of a figure the dataset cannot provide.
const NOT_AVAILABLE: &str = "n/a";

fn show<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

fn begin<R: BufRead, W: Write>(console: &mut Console<R, W>, heading: &str) -> Result<Instant> {
    console.say(&format!("\n{heading}\n"))?;
    Ok(Instant::now())
}

fn finish<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    started: Instant,
    group: &str,
) -> Result<()> {
    let elapsed = started.elapsed();
    debug!(group, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "Statistics computed");
    console.say(&format!("\nThis took {} seconds.", elapsed.as_secs_f64()))?;
    console.rule()
}

/// Most frequent month, day of week and start hour.
#[tracing::instrument(skip_all, fields(city = %data.city, trips = data.len()))]
pub fn time_stats<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data: &TripDataset,
) -> Result<()> {
    let started = begin(console, "Calculating The Most Frequent Times of Travel...")?;

    let stats = TimeStats::from_dataset(data);
    console.say(&format!("Most common month: {}", show(stats.month)))?;
    console.say(&format!("Most common day: {}", show(stats.day_of_week)))?;
    console.say(&format!("Most common start hour: {}", show(stats.hour)))?;

    finish(console, started, "time")
}

/// Most popular start station, end station and trip.
#[tracing::instrument(skip_all, fields(city = %data.city, trips = data.len()))]
pub fn station_stats<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data: &TripDataset,
) -> Result<()> {
    let started = begin(console, "Calculating The Most Popular Stations and Trip...")?;

    let stats = StationStats::from_dataset(data);
    console.say(&format!("Most common start station: {}", show(stats.start_station)))?;
    console.say(&format!("Most common end station: {}", show(stats.end_station)))?;
    console.say(&format!("Most common trip: {}", show(stats.trip)))?;

    finish(console, started, "station")
}

/// Total and mean trip duration as `M:SS`.
#[tracing::instrument(skip_all, fields(city = %data.city, trips = data.len()))]
pub fn trip_duration_stats<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data: &TripDataset,
) -> Result<()> {
    let started = begin(console, "Calculating Trip Duration...")?;

    let stats = DurationStats::from_dataset(data)?;
    console.say(&format!(
        "Total travel time = {}",
        format_minutes_seconds(stats.total_seconds)
    ))?;
    console.say(&format!(
        "Mean travel time = {}",
        show(stats.mean_seconds.map(format_minutes_seconds))
    ))?;

    finish(console, started, "duration")
}

/// User type, gender and birth year breakdowns.
#[tracing::instrument(skip_all, fields(city = %data.city, trips = data.len()))]
pub fn user_stats<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data: &TripDataset,
) -> Result<()> {
    let started = begin(console, "Calculating User Stats...")?;

    let stats = UserStats::from_dataset(data);

    console.say("User Types:")?;
    write_counts(console, &stats.user_types)?;

    match &stats.gender {
        Some(counts) => {
            console.say("Gender:")?;
            write_counts(console, counts)?;
        }
        None => console.say("Gender statistics not available for this city.")?,
    }

    match stats.birth_year {
        Some(years) => {
            console.say(&format!("Earliest year of birth: {}", show(years.earliest)))?;
            console.say(&format!("Most recent year of birth: {}", show(years.most_recent)))?;
            console.say(&format!("Most common year of birth: {}", show(years.most_common)))?;
        }
        None => console.say("Birth statistics not available for this city.")?,
    }

    finish(console, started, "user")
}

fn write_counts<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    counts: &[(String, usize)],
) -> Result<()> {
    let width = counts.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, count) in counts {
        writeln!(console.out(), "{label:<width$}  {count}")?;
    }
    console.say("")
}
