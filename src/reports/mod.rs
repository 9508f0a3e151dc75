//! Reports for houseshare
//!
//! Each report is generated from an expense snapshot plus settings, renders
//! itself for the terminal, and exports to CSV.

pub mod charts;
pub mod summary;

pub use charts::{ChartsReport, Share};
pub use summary::{format_transfers, SummaryReport};
