// ⚙️ Configuration - command line only, no config files

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_STORE_PATH: &str = "inventory.txt";

/// Log filter used when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "inventory-keeper", version, about = "Menu-driven shoe inventory kept in a flat delimited file")]
pub struct Cli {
    /// Store file to load and rewrite
    #[arg(short = 'f', long = "file", default_value = DEFAULT_STORE_PATH)]
    pub file: PathBuf,

    /// Open the full-screen browse view instead of the menu
    #[arg(long)]
    pub browse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub browse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            browse: false,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            store_path: cli.file,
            browse: cli.browse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["inventory-keeper"]).unwrap();
        assert_eq!(Config::from(cli), Config::default());
    }

    #[test]
    fn test_file_and_browse_flags() {
        let cli = Cli::try_parse_from(["inventory-keeper", "-f", "stock.csv", "--browse"]).unwrap();
        let config = Config::from(cli);
        assert_eq!(config.store_path, PathBuf::from("stock.csv"));
        assert!(config.browse);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["inventory-keeper", "--verbose"]).is_err());
    }
}
