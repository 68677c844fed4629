//! Command-line options and the shell configuration built from them.

use crate::error::ConfigError;
use crate::security::DEFAULT_PIN_ATTEMPTS;
use crate::utils::DEFAULT_PASSWORD_LENGTH;
use clap::Parser;

/// Upper bound for generated password length.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// In-memory password store with an interactive shell.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Admin PIN required to delete entries
    #[arg(
        long,
        env = "PWSTORE_ADMIN_PIN",
        default_value = "dsaastar",
        hide_default_value = true,
        hide_env_values = true
    )]
    pub admin_pin: String,

    /// PIN attempts allowed per delete
    #[arg(long, env = "PWSTORE_PIN_ATTEMPTS", default_value_t = DEFAULT_PIN_ATTEMPTS)]
    pub attempts: u32,

    /// Length of generated passwords
    #[arg(long, env = "PWSTORE_PASSWORD_LENGTH", default_value_t = DEFAULT_PASSWORD_LENGTH)]
    pub password_length: usize,

    /// Output format
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    pub output: OutputFormat,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validated settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub admin_pin: String,
    pub attempts: u32,
    pub password_length: usize,
    pub output: OutputFormat,
}

impl Cli {
    /// Validate options into a [`ShellConfig`].
    pub fn config(&self) -> Result<ShellConfig, ConfigError> {
        if self.admin_pin.trim().is_empty() {
            return Err(ConfigError::EmptyPin);
        }
        if self.attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.password_length == 0 || self.password_length > MAX_PASSWORD_LENGTH {
            return Err(ConfigError::PasswordLength {
                length: self.password_length,
                maximum: MAX_PASSWORD_LENGTH,
            });
        }

        Ok(ShellConfig {
            admin_pin: self.admin_pin.trim().to_string(),
            attempts: self.attempts,
            password_length: self.password_length,
            output: self.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pwstore"]).unwrap();
        let config = cli.config().unwrap();

        assert_eq!(config.attempts, 3);
        assert_eq!(config.password_length, 14);
        assert_eq!(config.output, OutputFormat::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "pwstore",
            "--admin-pin",
            "0420",
            "--attempts",
            "5",
            "--password-length",
            "20",
            "-o",
            "json",
            "-v",
        ])
        .unwrap();
        let config = cli.config().unwrap();

        assert_eq!(config.admin_pin, "0420");
        assert_eq!(config.attempts, 5);
        assert_eq!(config.password_length, 20);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_invalid_values() {
        let cli = Cli::try_parse_from(["pwstore", "--attempts", "0"]).unwrap();
        assert_eq!(cli.config(), Err(ConfigError::NoAttempts));

        let cli = Cli::try_parse_from(["pwstore", "--admin-pin", "  "]).unwrap();
        assert_eq!(cli.config(), Err(ConfigError::EmptyPin));

        let cli = Cli::try_parse_from(["pwstore", "--password-length", "1000"]).unwrap();
        assert_eq!(
            cli.config(),
            Err(ConfigError::PasswordLength {
                length: 1000,
                maximum: MAX_PASSWORD_LENGTH
            })
        );

        assert!(Cli::try_parse_from(["pwstore", "-o", "yaml"]).is_err());
    }
}
