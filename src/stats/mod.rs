//! Aggregate statistics over a [`crate::loader::TripDataset`].
//!
//! Each submodule computes one group of figures and returns a plain struct;
//! printing lives in [`crate::report`]. Figures that cannot be computed on an
//! empty dataset are `None`.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;
pub mod utility;

pub use duration::{DurationStats, format_minutes_seconds};
pub use station::StationStats;
pub use time::TimeStats;
pub use user::{BirthYearStats, UserStats};
