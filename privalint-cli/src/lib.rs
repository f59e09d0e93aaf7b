pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::*;
pub use commands::*;
