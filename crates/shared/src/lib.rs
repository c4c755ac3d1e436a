//! Shared types, errors, and configuration for Goldbook.
//!
//! This crate provides common types used across all other crates:
//! - Monetary and metal-weight value types with decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types with stable error codes
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
