pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod ui;
pub mod utils;
pub mod view;

pub use error::{AppError, Result};
