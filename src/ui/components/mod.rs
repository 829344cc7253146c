pub mod table;
pub mod terminal;
pub mod utils;

pub use table::build_table;
pub use terminal::TerminalGuard;
