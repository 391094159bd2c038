#![forbid(unsafe_code)]

//! Turn a daily activity log into per-task worklogs and upload them to an
//! issue tracker after interactive confirmation.

pub mod config;
pub mod console;
pub mod errors;
pub mod pipeline;
pub mod timelog;
pub mod tracker;

pub use config::TrackerConfig;
pub use errors::{AppError, Result};
