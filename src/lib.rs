/// Wordhoard - dictionary lookup and vocabulary quiz (TUI)
///
/// Core library providing validated word search against remote dictionary
/// services, a persistent lookup history and a multiple-choice quiz.

pub mod config;
pub mod core;
pub mod database;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
