pub mod dashboard;

pub use dashboard::{draw, Activity};
