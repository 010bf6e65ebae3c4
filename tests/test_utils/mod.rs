#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reposcout::error_handling::FetchError;
use reposcout::github::RepoSource;
use reposcout::models::Repository;
use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;
use tokio::net::TcpListener;

pub const HELLO_WORLD_BODY: &str =
    r#"[{"full_name":"octocat/Hello-World","html_url":"https://github.com/octocat/Hello-World"}]"#;

pub fn hello_world() -> Repository {
    Repository::new("octocat/Hello-World", "https://github.com/octocat/Hello-World")
}

struct Scripted {
    delay: Duration,
    result: Result<Vec<Repository>, FetchError>,
}

/// In-memory `RepoSource` with scripted answers per username.
/// Unknown usernames answer HTTP 404.
#[derive(Default)]
pub struct FakeSource {
    answers: HashMap<String, Scripted>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repos(self, username: &str, repos: Vec<Repository>) -> Self {
        self.with_answer(username, Duration::ZERO, Ok(repos))
    }

    pub fn with_error(self, username: &str, err: FetchError) -> Self {
        self.with_answer(username, Duration::ZERO, Err(err))
    }

    pub fn with_answer(
        mut self,
        username: &str,
        delay: Duration,
        result: Result<Vec<Repository>, FetchError>,
    ) -> Self {
        self.answers
            .insert(username.to_string(), Scripted { delay, result });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoSource for FakeSource {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        self.calls.lock().unwrap().push(username.to_string());

        let Some(scripted) = self.answers.get(username) else {
            return Err(FetchError::Http { status: 404 });
        };
        tokio::time::sleep(scripted.delay).await;
        scripted.result.clone()
    }
}

/// Local stand-in for the GitHub API on a random port, serving canned
/// answers for `/users/{name}/repos`. Unknown names get a GitHub-style 404.
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

struct StubState {
    answers: HashMap<String, (StatusCode, String)>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// `answers` are `(username, status, raw JSON body)`
    pub fn start(answers: &[(&str, StatusCode, &str)]) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(StubState {
            answers: answers
                .iter()
                .map(|(name, status, body)| ((*name).to_string(), (*status, (*body).to_string())))
                .collect(),
            requests: Arc::clone(&requests),
        });
        let app = Router::new()
            .route("/users/{name}/repos", get(list_repos))
            .with_state(state);

        // The CLI under test is a separate process, so the server needs its
        // own runtime that outlives the calling test's stack frame.
        let (addr_tx, addr_rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });
        let addr = addr_rx.recv().unwrap();

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn list_repos(
    State(stub): State<Arc<StubState>>,
    Path(name): Path<String>,
    uri: Uri,
) -> Response {
    stub.requests.lock().unwrap().push(uri.path().to_string());

    match stub.answers.get(&name) {
        Some((status, body)) => {
            (*status, [(CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })),
        )
            .into_response(),
    }
}
