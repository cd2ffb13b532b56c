//! Directory synchronization core for Asset Mirror
//!
//! Mirrors an input directory tree onto an output directory as a build
//! step: new and stale files are copied, orphans are removed, and each
//! action tolerates failure independently.
//!
//! The crate splits the work into three pieces:
//!
//! - **Diff engine** ([`SyncPlan`]): walks both trees (via `mirror-fs`),
//!   joins them on relative paths, and emits unordered copy/remove sets.
//! - **Executor** ([`executor::execute`]): runs every action concurrently
//!   and aggregates outcomes into a [`SyncReport`].
//! - **Plugin handle** ([`sync`] / [`AssetSync`]): the entry point a host
//!   build pipeline holds, with one hook invoked at its "write completed"
//!   lifecycle stage.
//!
//! # Example
//!
//! ```no_run
//! use mirror_core::{SyncOptions, sync};
//!
//! # async fn run() -> mirror_core::Result<()> {
//! let handle = sync(SyncOptions::new("src/assets", "dist/assets"))?;
//! let report = handle.on_write_complete().await?;
//! assert!(report.success);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod plan;
pub mod plugin;

pub use config::SyncOptions;
pub use error::{Error, Result};
pub use executor::SyncReport;
pub use plan::{CopyAction, SyncPlan};
pub use plugin::{AssetSync, sync};
