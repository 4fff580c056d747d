//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive macros.

use clap::{Parser, Subcommand};

/// Shopee affiliate link converter
#[derive(Parser, Debug)]
#[command(name = "shopee-affiliate")]
#[command(version)]
#[command(about = "Rewrites Shopee links with your affiliate tracking parameters", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Convert a single link and print the result
    Convert {
        /// Shopee URL (short links are resolved first)
        url: String,

        /// Affiliate ID (default: affiliate.default_affiliate_id)
        #[arg(long)]
        id: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: print to stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_server() {
        let cli = Cli::try_parse_from(["shopee-affiliate"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_convert_with_global_config() {
        let cli = Cli::try_parse_from([
            "shopee-affiliate",
            "convert",
            "shopee.com.br/p/1",
            "--id",
            "123",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::Convert {
                url: "shopee.com.br/p/1".to_string(),
                id: Some("123".to_string()),
            })
        );
    }

    #[test]
    fn test_config_generate() {
        let cli =
            Cli::try_parse_from(["shopee-affiliate", "config", "generate", "out.toml", "--force"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate {
                    output_path: Some("out.toml".to_string()),
                    force: true,
                }
            })
        );
    }

    #[test]
    fn test_convert_requires_url() {
        assert!(Cli::try_parse_from(["shopee-affiliate", "convert"]).is_err());
    }
}
