//! Configuration module for houseshare
//!
//! This module provides configuration management including:
//! - Platform-appropriate path resolution
//! - Household settings persistence (roster, categories, display)

pub mod paths;
pub mod settings;

pub use paths::HousesharePaths;
pub use settings::Settings;
