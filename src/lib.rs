pub mod config;
pub mod error;
pub mod runner;
pub mod store;
pub mod ui;
pub mod vcs;
pub mod version;
pub mod warning;

pub use error::{ReleaseError, Result};
