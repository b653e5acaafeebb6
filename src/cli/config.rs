use std::path::Path;

use tracing::instrument;
use tree_map::{Config, Store};

use crate::cli::terminal::Colorize;

const KEYS: &str = "newest_first, show_hints";

#[derive(Debug, clap::Parser)]
/// Show or modify display settings
///
/// Configuration is stored in data/config.toml next to the data file.
///
/// Available configuration keys:
///   `newest_first`  List records most recent first (default: true)
///   `show_hints`    Show the topic hint after recording (default: true)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   treemap config set `newest_first` false
    ///   treemap config set `show_hints` true
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set ('true' or 'false')
        value: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = Store::open(root)?.config_path();
        let config = Config::load_or_default(&config_path);

        match self.command {
            ConfigCommand::Show => {
                Self::show_config(&config);
                Ok(())
            }
            ConfigCommand::Get { key } => {
                println!("{}", Self::get(&config, &key)?);
                Ok(())
            }
            ConfigCommand::Set { key, value } => Self::set_config(config, &config_path, &key, &value),
        }
    }

    fn show_config(config: &Config) {
        println!("Configuration:");
        println!(
            "  newest_first: {} ({})",
            config.newest_first,
            if config.newest_first {
                "most recent record first".dim()
            } else {
                "oldest record first".dim()
            }
        );
        println!("  show_hints: {}", config.show_hints);
    }

    fn get(config: &Config, key: &str) -> anyhow::Result<bool> {
        match key {
            "newest_first" => Ok(config.newest_first),
            "show_hints" => Ok(config.show_hints),
            _ => anyhow::bail!("Unknown configuration key: '{key}'\nAvailable keys: {KEYS}"),
        }
    }

    fn set_config(
        mut config: Config,
        config_path: &Path,
        key: &str,
        value: &str,
    ) -> anyhow::Result<()> {
        let value = value
            .parse::<bool>()
            .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))?;

        match key {
            "newest_first" => config.newest_first = value,
            "show_hints" => config.show_hints = value,
            _ => anyhow::bail!("Unknown configuration key: '{key}'\nSupported keys: {KEYS}"),
        }

        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        println!("{}", format!("✅ {key} = {value}").success());
        Ok(())
    }
}
