use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::GitHubConfig;

const CLIENT_USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

/// One element of `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub html_url: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("GitHub API error: {status} - {reason}")]
    Api { status: u16, reason: String },
    #[error("Could not reach GitHub: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Unexpected response from GitHub: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("GitHub token is not a valid header value")]
    InvalidToken,
}

#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// First page of the user's repositories, in provider order.
    async fn list_repositories(&self, username: &str)
        -> Result<Vec<RepositorySummary>, SourceError>;

    /// Raw README text; `None` for any non-200 outcome.
    async fn fetch_documentation(&self, owner: &str, repo: &str) -> Option<String>;
}

pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    authorization: HeaderValue,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .map_err(SourceError::Transport)?;
        let mut authorization =
            HeaderValue::from_str(&format!("token {}", config.token.expose_secret()))
                .map_err(|_| SourceError::InvalidToken)?;
        authorization.set_sensitive(true);
        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            authorization,
        })
    }

    fn get(&self, path: &str, accept: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        debug!("github get: url={}", url);
        self.http
            .get(url)
            .header(ACCEPT, accept)
            .header(AUTHORIZATION, self.authorization.clone())
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn list_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, SourceError> {
        let response = self
            .get(&format!("/users/{username}/repos"), ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| {
                warn!("repository list request failed: user={} err={}", username, e);
                SourceError::Transport(e)
            })?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = response.text().await.map_err(SourceError::Transport)?;
                let repos: Vec<RepositorySummary> =
                    serde_json::from_str(&body).map_err(SourceError::Decode)?;
                info!("repositories listed: user={} count={}", username, repos.len());
                Ok(repos)
            }
            StatusCode::FORBIDDEN => {
                warn!("GitHub rate limit hit: user={}", username);
                Err(SourceError::RateLimited)
            }
            other => {
                let reason = other.canonical_reason().unwrap_or("Unknown").to_string();
                warn!(
                    "GitHub API error: user={} status={} reason={}",
                    username,
                    other.as_u16(),
                    reason
                );
                Err(SourceError::Api {
                    status: other.as_u16(),
                    reason,
                })
            }
        }
    }

    async fn fetch_documentation(&self, owner: &str, repo: &str) -> Option<String> {
        let response = match self
            .get(&format!("/repos/{owner}/{repo}/readme"), ACCEPT_RAW)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("readme request failed: repo={}/{} err={}", owner, repo, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(
                "no readme: repo={}/{} status={}",
                owner,
                repo,
                response.status().as_u16()
            );
            return None;
        }

        match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("readme body unreadable: repo={}/{} err={}", owner, repo, e);
                None
            }
        }
    }
}
