//! # simforge-core
//!
//! Core library for simforge providing:
//! - Layered configuration (embedded defaults, user file, environment)
//! - Dependency and package manifest parsing
//! - Shared error types

pub mod config;
pub mod error;
pub mod manifest;
pub mod utils;

pub use config::{ConfigLoader, SimforgeConfig};
pub use error::{Error, Result};
pub use manifest::{DependencyManifest, PackageManifest};
