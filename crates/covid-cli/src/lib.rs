//! CLI library components for the COVID-19 severity views.

pub mod logging;
pub mod runner;
pub mod types;
