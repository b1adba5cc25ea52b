//! Layered configuration for the `annotate` command: built-in defaults, an
//! optional TOML file, `--set` overrides and finally dedicated CLI flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
