//! Shared types, errors, configuration, and constants for the maktab
//! scheduling workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
