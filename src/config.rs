//! Process-wide configuration.
//!
//! Everything here is read once at startup (flags, environment, `.env`) and
//! frozen into a [`Config`] that handlers share through an `Arc`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use lettre::message::Mailbox;
use secrecy::SecretString;

pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const SERVE_AFTER_HELP: &str = "\
ENVIRONMENT:
    GITHUB_USERNAME     Account whose public repositories are listed
    GITHUB_TOKEN        Token sent as `Authorization: token ...`
    EMAIL               Owner address; receives contact messages
    EMAIL_PASSWORD      App password used to log in to the SMTP relay

    A .env file in the working directory is loaded before parsing.

EXAMPLES:
    folio --listen 0.0.0.0:8501
    GITHUB_USERNAME=octocat folio --log-format json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("invalid owner email address {address:?}: {reason}")]
    OwnerAddress { address: String, reason: String },
}

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "folio — personal portfolio page server",
    version,
    after_help = SERVE_AFTER_HELP
)]
pub struct Cli {
    /// GitHub account whose repositories are shown
    #[arg(long, env = "GITHUB_USERNAME")]
    pub github_username: String,
    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,
    /// Owner email address (contact form recipient and SMTP login)
    #[arg(long, env = "EMAIL")]
    pub email: String,
    /// Owner email app password
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub email_password: String,
    /// Address to listen on
    #[arg(long, env = "FOLIO_LISTEN", default_value = "127.0.0.1:8501")]
    pub listen: SocketAddr,
    /// GitHub REST API base URL
    #[arg(long, env = "FOLIO_GITHUB_API", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
    /// Profile image served at /profile-image
    #[arg(long, env = "FOLIO_PROFILE_IMAGE", default_value = "123444116.jpg")]
    pub profile_image: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FOLIO_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    /// Log format (text, json)
    #[arg(long, env = "FOLIO_LOG_FORMAT", default_value = "text")]
    pub log_format: String,
}

/// Immutable runtime configuration.
#[derive(Debug)]
pub struct Config {
    pub listen: SocketAddr,
    pub github: GitHubConfig,
    pub mail: MailConfig,
    pub profile_image: PathBuf,
}

#[derive(Debug)]
pub struct GitHubConfig {
    pub username: String,
    pub token: SecretString,
    pub api_base: String,
}

#[derive(Debug)]
pub struct MailConfig {
    pub owner: Mailbox,
    pub password: SecretString,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let username = cli.github_username.trim().to_string();
        if username.is_empty() {
            return Err(ConfigError::Empty("GITHUB_USERNAME"));
        }

        let address = cli.email.trim().to_string();
        if address.is_empty() {
            return Err(ConfigError::Empty("EMAIL"));
        }
        let owner = address
            .parse::<Mailbox>()
            .map_err(|e| ConfigError::OwnerAddress {
                address: address.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            listen: cli.listen,
            github: GitHubConfig {
                username,
                token: SecretString::from(cli.github_token),
                api_base: cli.api_base.trim_end_matches('/').to_string(),
            },
            mail: MailConfig {
                owner,
                password: SecretString::from(cli.email_password),
                smtp_host: SMTP_HOST.to_string(),
                smtp_port: SMTP_PORT,
            },
            profile_image: cli.profile_image,
        })
    }
}
