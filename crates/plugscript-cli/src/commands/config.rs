use crate::GlobalOpts;
use clap::Subcommand;
use colored::Colorize;
use plugscript_config::{Config, KNOWN_KEYS};
use plugscript_logger as logger;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show every configured value
    Show,
    /// Print one configured value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Get or set the path to the config file.
    /// If `new_path` is provided, future runs read the config from that path.
    /// If omitted, the current configuration file path is printed.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

/// Returns false when the action failed
pub fn handle_config(action: Option<ConfigAction>, opts: GlobalOpts) -> bool {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => match Config::load() {
            Ok(config) => {
                println!("{}", "Configuration:".bold().green());
                if config.is_empty() {
                    if opts.verbosity_level() > 0 {
                        println!("  {}", "(empty)".yellow());
                    }
                } else {
                    for (key, value) in config.values_iter() {
                        println!("  {}: {}", key.cyan(), value);
                    }
                }
                true
            }
            Err(e) => {
                logger::error(&format!("Failed to load config: {}", e));
                false
            }
        },
        ConfigAction::Get { key } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                logger::error(&format!(
                    "Unknown config key: {}. Supported keys: {}",
                    key,
                    KNOWN_KEYS.join(", ")
                ));
                return false;
            }
            match Config::load() {
                Ok(config) => {
                    match config.get(&key) {
                        Some(value) => println!("{}", value),
                        None => logger::info(&format!("{} is not set", key)),
                    }
                    true
                }
                Err(e) => {
                    logger::error(&format!("Failed to load config: {}", e));
                    false
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let result = Config::load().and_then(|mut config| {
                config.set(&key, value.clone())?;
                config.save()
            });
            match result {
                Ok(()) => {
                    logger::success(&format!("Set {} = {}", key, value));
                    true
                }
                Err(e) => {
                    logger::error(&format!("Failed to set {}: {}", key, e));
                    false
                }
            }
        }
        ConfigAction::Path { new_path } => match new_path {
            Some(path) => match Config::set_path(&path) {
                Ok(()) => {
                    logger::success(&format!("Config path set to {}", path));
                    true
                }
                Err(e) => {
                    logger::error(&format!("Failed to set config path: {}", e));
                    false
                }
            },
            None => {
                let config_path = Config::path();
                logger::debug(&format!("Reading config from: {}", config_path.display()));
                println!("{}", config_path.display());
                true
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown_key_fails_without_io() {
        let ok = handle_config(
            Some(ConfigAction::Get {
                key: "not-a-key".to_string(),
            }),
            GlobalOpts::default(),
        );
        assert!(!ok);
    }
}
