pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_present, validate_url,
};

pub const DEFAULT_ARTICLES_FILE: &str = "required_articles.txt";
pub const DEFAULT_OUTPUT_ROOT: &str = "result";

#[cfg(feature = "cli")]
use crate::domain::model::DuplicatePolicy;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "photo-collector")]
#[command(about = "Sort product photos into result/<required article>/<article>/ using the inventory API")]
pub struct CliConfig {
    #[arg(long, env = "API_URL", default_value = "")]
    pub api_url: String,

    #[arg(long, env = "API_LOGIN", default_value = "")]
    pub api_login: String,

    #[arg(long, env = "API_PASSWORD", default_value = "", hide_env_values = true)]
    pub api_password: String,

    #[arg(long, env = "PHOTO_DIRECTORY", default_value = "")]
    pub photo_directory: String,

    #[arg(long, default_value = DEFAULT_ARTICLES_FILE)]
    pub articles_file: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    pub output_root: String,

    #[arg(long, value_enum, default_value_t = DuplicatePolicy::Unique)]
    pub duplicate_policy: DuplicatePolicy,

    #[arg(long = "timeout", help = "Per-request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Read settings from a TOML file instead of flags/environment")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn api_login(&self) -> &str {
        &self.api_login
    }

    fn api_password(&self) -> &str {
        &self.api_password
    }

    fn photo_directory(&self) -> &str {
        &self.photo_directory
    }

    fn articles_file(&self) -> &str {
        &self.articles_file
    }

    fn output_root(&self) -> &str {
        &self.output_root
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_present("API_URL", config.api_url())?;
    validate_url("API_URL", config.api_url())?;
    validate_present("API_LOGIN", config.api_login())?;
    validate_present("API_PASSWORD", config.api_password())?;
    validate_present("PHOTO_DIRECTORY", config.photo_directory())?;
    validate_path("PHOTO_DIRECTORY", config.photo_directory())?;
    validate_path("articles_file", config.articles_file())?;
    validate_path("output_root", config.output_root())?;
    if let Some(timeout) = config.request_timeout_secs() {
        validate_positive_number("timeout", timeout, 1)?;
    }
    Ok(())
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["photo-collector"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[
            "--api-url",
            "https://api.example.com/items",
            "--api-login",
            "user",
            "--api-password",
            "secret",
            "--photo-directory",
            "./photos",
        ]);

        assert_eq!(config.articles_file(), "required_articles.txt");
        assert_eq!(config.output_root(), "result");
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::Unique);
        assert_eq!(config.request_timeout_secs(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_policy_flag() {
        let config = parse(&["--duplicate-policy", "per-match"]);
        assert_eq!(config.duplicate_policy(), DuplicatePolicy::PerMatch);
    }

    #[test]
    fn test_missing_credentials_fail_validation() {
        let config = parse(&[
            "--api-url",
            "https://api.example.com/items",
            "--api-login",
            "",
            "--api-password",
            "",
            "--photo-directory",
            "./photos",
        ]);
        assert!(config.validate().is_err());
    }
}
