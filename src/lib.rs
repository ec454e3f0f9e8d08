pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod tui;

pub use error::{Result, ViewError};
