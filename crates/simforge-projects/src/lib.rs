//! # simforge-projects
//!
//! Orchestration for multi-repository simulation projects:
//! - Cloning projects from the configured remote
//! - Resolving and cloning a project's mainline dependencies
//! - Installing packages and building projects
//! - Running the development watch server
//!
//! Every step spawns processes through a [`process::CommandRunner`] and
//! reports progress to a [`observer::ProgressObserver`], both held by a
//! [`Workspace`].
//!
//! # Examples
//!
//! ```no_run
//! use simforge_core::SimforgeConfig;
//! use simforge_projects::{resolve_dependencies, Workspace};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ws = Workspace::new("/tmp/sims", SimforgeConfig::default());
//! let report = resolve_dependencies(&ws, "area-model-common").await?;
//! println!("{} cloned, {} failed", report.succeeded(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod dependencies;
pub mod dev_server;
pub mod error;
pub mod git;
pub mod observer;
pub mod package;
pub mod process;
pub mod workspace;

pub use dependencies::{plan_dependencies, resolve_dependencies, ResolveReport};
pub use dev_server::{install_core_dependencies, run_dev_server};
pub use error::{Error, Result};
pub use git::{clone_project, CloneOutcome, CloneTarget};
pub use observer::{NoOpObserver, ProgressObserver};
pub use package::{build_project, install_packages, BuildReport};
pub use process::{CommandRunner, CommandSpec, OutputLine, ProcessOutcome, SystemRunner};
pub use workspace::Workspace;
