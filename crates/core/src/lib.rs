//! Core upload logic for Best Papers.
//!
//! This crate contains the upload path with ZERO web dependencies.
//! Validation rules, filename handling, and storage backends live here.
//!
//! # Modules
//!
//! - `upload` - File validation and the primary/fallback storage adapter
//! - `storage` - OpenDAL-backed blob stores

pub mod storage;
pub mod upload;
