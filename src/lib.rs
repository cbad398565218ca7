pub mod catalog;
pub mod console;
pub mod filters;
pub mod loader;
pub mod report;
pub mod session;
pub mod stats;
