use thiserror::Error;

/// Why a repository fetch produced no list.
///
/// Every variant collapses to the same user-visible outcome (an empty list);
/// the distinction only survives in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("username is empty")]
    EmptyInput,

    #[error("request failed before a response arrived: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },

    #[error("response body is not a repository list: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short recovery hint attached to the failure log line
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::EmptyInput => "type a username to search",
            Self::Transport(_) => "check internet connection and the configured api_base_url",
            Self::Http { status: 404 } => "verify the account exists on GitHub",
            Self::Http { status: 403 | 429 } => "GitHub may be throttling unauthenticated requests",
            Self::Http { .. } => "GitHub status: https://www.githubstatus.com/",
            Self::Decode(_) => "api_base_url may not point at a GitHub-compatible API",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}
