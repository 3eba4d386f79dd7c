//! # CLI Layer
//!
//! One client of the reportdash library. This is the only place that
//! touches stdout, exit codes, environment variables and the config dir.
//!
//! Each invocation builds a fresh [`reportdash::api::DashboardApi`] seeded
//! from the configured source; nothing persists between runs except
//! `config.json`.
//!
//! ## Structure
//!
//! - `args`: clap definitions
//! - `commands`: context setup and one `handle_*` per subcommand
//! - `print`: terminal formatting of `CmdResult`s and records

mod args;
mod commands;
mod print;

pub use args::Cli;
pub use commands::run;
