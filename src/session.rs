//! The prompt → load → report → restart loop.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

use crate::catalog::CityCatalog;
use crate::console::Console;
use crate::filters::collect_filters;
use crate::loader::load_data;
use crate::report;

const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Runs sessions until the user declines to restart.
///
/// Returns the number of completed iterations. Load and report errors are not
/// recovered; they end the run.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    catalog: &CityCatalog,
) -> Result<usize> {
    let mut iterations = 0;

    loop {
        let selection = collect_filters(console, catalog)?;
        info!(%selection, "Filters selected");

        let data = load_data(catalog, &selection)?;

        report::time_stats(console, &data)?;
        report::station_stats(console, &data)?;
        report::trip_duration_stats(console, &data)?;
        report::user_stats(console, &data)?;

        iterations += 1;

        if !wants_restart(console.ask(RESTART_PROMPT)?.as_deref()) {
            break;
        }
    }

    info!(iterations, "Session finished");
    Ok(iterations)
}

/// Only an exact, case-insensitive `yes` restarts. End of input stops.
pub fn wants_restart(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.to_lowercase() == "yes")
}
