pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

pub use self::toml_config::{MoodleConfig, MoodleSection};

#[cfg(feature = "cli")]
pub use self::cli::Cli;
