//! Month/day filter vocabulary and the interactive filter prompts.

use anyhow::{Result, bail};
use std::fmt;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::catalog::CityCatalog;
use crate::console::Console;

/// Months covered by the trip data (January through June).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    /// Calendar month number, 1 = January.
    pub fn number(self) -> u32 {
        Self::ALL.iter().position(|m| *m == self).map_or(0, |i| i as u32 + 1)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Day names accepted by the day filter, listed Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayName {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayName {
    pub const ALL: [DayName; 7] = [
        DayName::Sunday,
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DayName::Sunday => "sunday",
            DayName::Monday => "monday",
            DayName::Tuesday => "tuesday",
            DayName::Wednesday => "wednesday",
            DayName::Thursday => "thursday",
            DayName::Friday => "friday",
            DayName::Saturday => "saturday",
        }
    }

    /// Position in the Sunday-first table, 1 = Sunday … 7 = Saturday.
    ///
    /// The loader compares this against the Monday-based `day_of_week + 1`,
    /// so each name selects the weekday after it (`monday` keeps Tuesdays).
    /// Existing reports depend on this mapping; do not change it silently.
    pub fn filter_index(self) -> u32 {
        Self::ALL.iter().position(|d| *d == self).map_or(0, |i| i as u32 + 1)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

/// Either no restriction or a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T: Copy> Choice<T> {
    /// Parses `"all"` or defers to `parse` for a specific value.
    fn parse(input: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Self> {
        if input == "all" {
            Some(Choice::All)
        } else {
            parse(input).map(Choice::Only)
        }
    }
}

pub type MonthFilter = Choice<Month>;
pub type DayFilter = Choice<DayName>;

impl MonthFilter {
    pub fn from_input(input: &str) -> Option<Self> {
        Choice::parse(input, Month::from_name)
    }
}

impl DayFilter {
    pub fn from_input(input: &str) -> Option<Self> {
        Choice::parse(input, DayName::from_name)
    }
}

/// The validated `(city, month, day)` triple for one session iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: String,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = match self.month {
            Choice::All => "all",
            Choice::Only(m) => m.name(),
        };
        let day = match self.day {
            Choice::All => "all",
            Choice::Only(d) => d.name(),
        };
        write!(f, "{} / {} / {}", self.city, month, day)
    }
}

/// Lowercases raw user input. Surrounding whitespace is kept, so `" chicago"`
/// is not a valid answer.
pub fn normalize(input: &str) -> String {
    input.to_lowercase()
}

/// Asks for city, month and day until each answer is valid.
///
/// Invalid cities get a reminder of the valid choices; invalid months and
/// days are simply asked again. There is no retry limit, but running out of
/// input is an error.
pub fn collect_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    catalog: &CityCatalog,
) -> Result<FilterSelection> {
    console.say("Hello! Let's explore some US bikeshare data!")?;

    let city = loop {
        let city = normalize(&require(console, "Which city would you like to explore? ")?);
        if catalog.contains(&city) {
            break city;
        }
        debug!(input = %city, "Rejected city");
        let mut message = String::from("You may choose from: ");
        for key in catalog.cities() {
            message.push_str(&format!("|{key}| "));
        }
        console.say(&message)?;
    };

    let month = loop {
        let answer = normalize(&require(
            console,
            "Which month would you like to explore (\"All\" for all months)? ",
        )?);
        if let Some(month) = MonthFilter::from_input(&answer) {
            break month;
        }
        debug!(input = %answer, "Rejected month");
    };

    let day = loop {
        let answer = normalize(&require(
            console,
            "Which day would you like to explore (\"All\" for all days of the week)? ",
        )?);
        if let Some(day) = DayFilter::from_input(&answer) {
            break day;
        }
        debug!(input = %answer, "Rejected day");
    };

    console.rule()?;
    Ok(FilterSelection { city, month, day })
}

fn require<R: BufRead, W: Write>(console: &mut Console<R, W>, prompt: &str) -> Result<String> {
    match console.ask(prompt)? {
        Some(line) => Ok(line),
        None => bail!("no input received while waiting for filter selection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<FilterSelection>, String) {
        let catalog = CityCatalog::new(".");
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let result = collect_filters(&mut console, &catalog);
        let output = String::from_utf8(console.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn test_month_numbers_follow_calendar() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::June.number(), 6);
        assert_eq!(Month::from_name("march"), Some(Month::March));
        assert_eq!(Month::from_name("july"), None);
    }

    #[test]
    fn test_day_filter_index_is_sunday_first() {
        assert_eq!(DayName::Sunday.filter_index(), 1);
        assert_eq!(DayName::Monday.filter_index(), 2);
        assert_eq!(DayName::Tuesday.filter_index(), 3);
        assert_eq!(DayName::Saturday.filter_index(), 7);
    }

    #[test]
    fn test_choice_parsing_accepts_all() {
        assert_eq!(MonthFilter::from_input("all"), Some(Choice::All));
        assert_eq!(DayFilter::from_input("all"), Some(Choice::All));
        assert_eq!(DayFilter::from_input("friday"), Some(Choice::Only(DayName::Friday)));
        assert_eq!(DayFilter::from_input("fri"), None);
    }

    #[test]
    fn test_accepts_any_case() {
        let (result, _) = run("New York City\nMARCH\nTuesday\n");
        let selection = result.unwrap();
        assert_eq!(selection.city, "new york city");
        assert_eq!(selection.month, Choice::Only(Month::March));
        assert_eq!(selection.day, Choice::Only(DayName::Tuesday));
    }

    #[test]
    fn test_invalid_city_lists_choices_and_reprompts() {
        let (result, output) = run("boston\n\nchicago\nall\nall\n");
        assert_eq!(result.unwrap().city, "chicago");
        let reminder = "You may choose from: |chicago| |new york city| |washington| ";
        assert_eq!(output.matches(reminder).count(), 2);
    }

    #[test]
    fn test_padded_answers_are_rejected() {
        let (result, output) = run(" chicago\nchicago\n all\nall\nall \nall\n");
        let selection = result.unwrap();
        assert_eq!(selection.to_string(), "chicago / all / all");
        let reminder = "You may choose from: |chicago| |new york city| |washington| ";
        assert_eq!(output.matches(reminder).count(), 1);
        assert_eq!(output.matches("Which city").count(), 2);
        assert_eq!(output.matches("Which month").count(), 2);
        assert_eq!(output.matches("Which day").count(), 2);
    }

    #[test]
    fn test_normalize_only_lowercases() {
        assert_eq!(normalize("New York City"), "new york city");
        assert_eq!(normalize("  Chicago "), "  chicago ");
    }

    #[test]
    fn test_invalid_month_and_day_reprompt_silently() {
        let (result, output) = run("washington\njuly\nall\nfunday\nsunday\n");
        let selection = result.unwrap();
        assert_eq!(selection.month, Choice::All);
        assert_eq!(selection.day, Choice::Only(DayName::Sunday));
        assert!(!output.contains("You may choose from"));
        assert_eq!(output.matches("Which month").count(), 2);
        assert_eq!(output.matches("Which day").count(), 2);
    }

    #[test]
    fn test_ends_with_rule() {
        let (_, output) = run("chicago\nall\nall\n");
        assert!(output.ends_with(&format!("{}\n", "-".repeat(40))));
    }

    #[test]
    fn test_eof_is_an_error() {
        let (result, _) = run("chicago\njanuary\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_selection_display() {
        let selection = FilterSelection {
            city: "chicago".into(),
            month: Choice::Only(Month::May),
            day: Choice::All,
        };
        assert_eq!(selection.to_string(), "chicago / may / all");
    }
}
