pub mod cli;
#[cfg(feature = "cli")]
pub mod cli_args;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;
