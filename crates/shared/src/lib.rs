//! Shared errors and configuration for fakelink.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application-wide error types with their HTTP mapping
//! - Configuration management

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
