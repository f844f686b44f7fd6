//! Library half of the `field-order` command-line tool.

pub mod cli;
pub mod commands;
pub mod table;

pub use cli::{Cli, Commands, Toggle};
pub use commands::run;
