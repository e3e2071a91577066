//! numlab-cli: command runners behind the `numlab` binary.
//!
//! Each subcommand has a config type loaded from JSON and a `run_*`
//! function returning a serializable report, so the binary only parses
//! arguments, applies overrides and prints.
pub mod commands;
pub mod util;
