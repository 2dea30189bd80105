// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # ytdata Store
//!
//! On-disk configuration for the `ytdata` command line tool.
//!
//! The configuration is a JSON file under the platform config directory
//! (`~/.config/ytdata/config.json` on Linux). Every field has a default,
//! so a missing file or a partial one is valid.
//!
//! ## Usage
//!
//! ```ignore
//! use ytdata_store::Config;
//!
//! let config = Config::load()?;
//! let settings = config.fetch_settings()?;
//! ```

pub mod config;
pub mod error;

pub use config::{ApiConfig, CollectConfig, Config, GeneralConfig, TranscriptConfig};
pub use error::StoreError;
