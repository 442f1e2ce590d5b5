pub mod command;
pub mod config;
pub mod error;
pub mod fallback;
pub mod git_ops;
pub mod packaging;
pub mod platform;
pub mod ui;
pub mod version;

pub use error::{RelkitError, Result};
