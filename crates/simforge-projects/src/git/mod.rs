//! Git operations module
//!
//! Repositories are cloned from the configured remote into the workspace
//! root. A directory that already exists under the target name counts as
//! fetched; nothing inside it is inspected.
//!
//! # Examples
//!
//! ```no_run
//! use simforge_core::SimforgeConfig;
//! use simforge_projects::git::{clone_project, CloneTarget};
//! use simforge_projects::Workspace;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ws = Workspace::new("/tmp/sims", SimforgeConfig::default());
//! clone_project(&ws, &CloneTarget::aliased("perennial", "perennial-alias")).await?;
//! # Ok(())
//! # }
//! ```

mod clone;

pub use clone::{clone_project, CloneOutcome, CloneTarget};
