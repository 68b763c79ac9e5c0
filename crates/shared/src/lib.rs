//! Shared types, errors, and configuration for Opexhub.
//!
//! This crate provides common types used across all other crates:
//! - The `YearMonth` key every financial table is indexed by
//! - Typed IDs for master-data references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::YearMonth;
