//! Common utilities shared across crates.
//!
//! This crate provides:
//! - Unified error handling with provider error classification
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
