//! Shared types, errors, and configuration for Tallybook.
//!
//! This crate provides common types used across all other crates:
//! - Decimal money helpers (debit/credit split, cent precision)
//! - Typed IDs for type-safe entity references
//! - Pagination types for journal listings
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup for the binaries

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
