// Storage module - results file output
pub mod csv_report;

pub use csv_report::*;
