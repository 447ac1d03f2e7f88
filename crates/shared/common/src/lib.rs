//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified error handling across domain, conversion and storage failures
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
