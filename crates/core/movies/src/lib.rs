pub use cli::*;
pub mod cli;
pub mod command;
pub mod error;
pub mod fetch;
pub mod resource;

pub type ConfigError = movies_config::MoviesConfigError;
