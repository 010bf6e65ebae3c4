use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};

use crate::config::Settings;
use crate::error_handling::FetchError;
use crate::models::Repository;

/// Anything that can list the public repositories of an account.
#[async_trait]
pub trait RepoSource: Send + Sync + 'static {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, FetchError>;
}

/// Unauthenticated client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let base_url = settings.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent).context("Invalid user_agent value")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    /// `{base}/users/{username}/repos`, with the username encoded as a
    /// single path segment
    #[must_use]
    pub fn repos_url(&self, username: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `Settings::validate`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", username, "repos"]);
        }
        url
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        if username.is_empty() {
            return Err(FetchError::EmptyInput);
        }

        let url = self.repos_url(username);
        tracing::debug!(%url, "requesting repositories");

        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let repos = response.json::<Vec<Repository>>().await?;
        tracing::debug!(username, count = repos.len(), "repositories received");
        Ok(repos)
    }
}
