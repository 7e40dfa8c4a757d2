//! # Rollcall Common Library
//!
//! Shared code for the Rollcall attendance tracker including:
//! - Database initialization and models
//! - National identity (RUT) validation
//! - Error taxonomy
//! - Configuration / data-folder resolution
//! - Timestamp utilities

pub mod config;
pub mod db;
pub mod error;
pub mod rut;
pub mod time;

pub use error::{Error, Result};
