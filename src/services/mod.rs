//! Services module - the check-and-update workflow.
//!
//! # Components
//!
//! - [`catalog`]: [`HttpClient`] seam, the `reqwest` implementation, and
//!   selection of the ElvUI record from the remote catalog
//! - [`scanner`]: Addon folder inventory and TOC version discovery
//! - [`version`]: Lenient version parsing and comparison
//! - [`archive`]: Zip extraction into the addon directory
//! - [`updater`]: [`Updater`], which chains the above into one run
//!
//! Everything here is blocking and single-threaded. Each step returns
//! `Result<_, UpdateError>` and the first error ends the run.
//!
//! # Usage Example
//!
//! ```ignore
//! use elvui_updater::services::{ReqwestClient, Updater};
//!
//! let mut updater = Updater::new(settings, ReqwestClient::new()?);
//! let outcome = updater.run()?;
//! tracing::info!("{}", outcome.summary());
//! ```

pub mod archive;
pub mod catalog;
pub mod scanner;
pub mod updater;
pub mod version;

pub use archive::extract_archive;
pub use catalog::{HttpClient, ReqwestClient, fetch_elvui_record, select_record};
pub use scanner::{installed_version, scan, tracked_addons};
pub use updater::{Updater, remove_bundled_folders};
pub use version::{AddonVersion, compare, is_outdated, parse_version};
