//! Shared building blocks for the SQL editor workspace.
//!
//! Holds the data models exchanged with backend services, the common error
//! type, environment-driven configuration, tracing setup and small utilities.

pub mod config;
pub mod errors;
pub mod models;
pub mod response;
pub mod telemetry;
pub mod utils;
