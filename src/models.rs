use serde::{Deserialize, Serialize};
use std::fmt;

/// A public repository as listed by `GET /users/{username}/repos`.
///
/// Only the two fields the view needs are kept; everything else in the
/// upstream payload is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String, // e.g. "octocat/Hello-World"
    pub html_url: String,
}

impl Repository {
    pub fn new(full_name: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            html_url: html_url.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}
