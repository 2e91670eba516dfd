//! Shared errors and configuration for Best Papers.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application-wide error types and their HTTP mapping
//! - Layered configuration loading

pub mod config;
pub mod error;

pub use config::{AppConfig, StorageProvider, StorageStrategy};
pub use error::{AppError, GENERIC_FAILURE_MESSAGE};
