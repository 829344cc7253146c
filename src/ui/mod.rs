pub mod components;
pub mod console;
pub mod flows;
pub mod form;
pub mod screens;

pub use flows::dashboard::run_dashboard;
