#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Path as UrlPath, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use clap::Parser;
use lettre::address::Envelope;
use lettre::AsyncTransport;

use folio::config::{Cli, Config};
use folio::github::GitHubClient;
use folio::notifier::Notifier;
use folio::server::AppState;

pub const TOKEN: &str = "secret-token";
pub const USER: &str = "octocat";
pub const OWNER_EMAIL: &str = "owner@example.com";

/// One request seen by the fake API.
#[derive(Debug, Clone)]
pub struct Seen {
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

/// Scripted stand-in for the GitHub REST API.
pub struct FakeGitHub {
    pub list_status: StatusCode,
    pub list_body: String,
    pub readmes: HashMap<String, String>,
    pub seen: Mutex<Vec<Seen>>,
}

impl FakeGitHub {
    pub fn listing(status: StatusCode, body: &str) -> Self {
        Self {
            list_status: status,
            list_body: body.to_string(),
            readmes: HashMap::new(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_readme(mut self, repo: &str, text: &str) -> Self {
        self.readmes.insert(repo.to_string(), text.to_string());
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, path: String, headers: &HeaderMap) {
        let get = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(Seen {
            path,
            authorization: get(header::AUTHORIZATION),
            accept: get(header::ACCEPT),
        });
    }
}

async fn list_repos(
    State(fake): State<Arc<FakeGitHub>>,
    UrlPath(user): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    fake.record(format!("/users/{user}/repos"), &headers);
    (
        fake.list_status,
        [(header::CONTENT_TYPE, "application/json")],
        fake.list_body.clone(),
    )
        .into_response()
}

async fn readme(
    State(fake): State<Arc<FakeGitHub>>,
    UrlPath((owner, repo)): UrlPath<(String, String)>,
    headers: HeaderMap,
) -> Response {
    fake.record(format!("/repos/{owner}/{repo}/readme"), &headers);
    match fake.readmes.get(&repo) {
        Some(text) => (StatusCode::OK, text.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#).into_response(),
    }
}

/// Serves `fake` on an ephemeral local port and returns its base URL.
pub async fn spawn_fake_github(fake: FakeGitHub) -> (String, Arc<FakeGitHub>) {
    let fake = Arc::new(fake);
    let app = Router::new()
        .route("/users/:user/repos", get(list_repos))
        .route("/repos/:owner/:repo/readme", get(readme))
        .with_state(Arc::clone(&fake));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake github");
    let addr = listener.local_addr().expect("fake github addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake github");
    });
    (format!("http://{addr}"), fake)
}

/// An address nothing is listening on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn config(api_base: &str, profile_image: &Path) -> Config {
    let cli = Cli::try_parse_from([
        "folio",
        "--github-username",
        USER,
        "--github-token",
        TOKEN,
        "--email",
        OWNER_EMAIL,
        "--email-password",
        "app-password",
        "--api-base",
        api_base,
        "--profile-image",
        profile_image.to_str().unwrap(),
    ])
    .expect("parse test cli");
    Config::try_from(cli).expect("valid test config")
}

pub type Outbox = Arc<Mutex<Vec<(Envelope, String)>>>;

/// Mail transport that keeps every message instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub outbox: Outbox,
    pub fail: bool,
}

#[async_trait]
impl AsyncTransport for RecordingTransport {
    type Ok = ();
    type Error = std::io::Error;

    async fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "relay unreachable",
            ));
        }
        self.outbox
            .lock()
            .unwrap()
            .push((envelope.clone(), String::from_utf8_lossy(email).into_owned()));
        Ok(())
    }
}

pub fn app_state(config: Config, transport: RecordingTransport) -> AppState {
    let source = GitHubClient::new(&config.github).expect("github client");
    let notifier = Notifier::with_transport(transport, config.mail.owner.clone());
    AppState {
        config: Arc::new(config),
        source: Arc::new(source),
        notifier: Arc::new(notifier),
    }
}
