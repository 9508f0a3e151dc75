//! houseshare - shared-household expense tracker
//!
//! Roommates log what they paid for; houseshare totals spending by category,
//! person and month, works out each roommate's fair share, and produces the
//! shortest practical list of "who pays whom" to settle up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `engine`: Pure aggregation and settlement over an expense snapshot
//! - `models`: Core data models (expenses, money, month labels, session)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `storage`: JSON file storage layer with change events
//! - `audit`: Audit logging system
//! - `services`: Business logic layer (validation, role gating, import, watching)
//! - `reports`: Summary and chart reports
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `houseshare` binary
//! - `logging`: Diagnostic output setup
//!
//! # Example
//!
//! ```rust,ignore
//! use houseshare::config::{paths::HousesharePaths, settings::Settings};
//! use houseshare::engine::settlement_plan;
//! use houseshare::storage::Storage;
//!
//! let paths = HousesharePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let plan = settlement_plan(&storage.expenses.get_all()?, &settings.roommates);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{HouseshareError, HouseshareResult};
