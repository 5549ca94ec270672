//! Page composition.
//!
//! [`gather_projects`] does all the I/O for one render; [`render_page`] is a
//! pure function from the gathered [`PageState`] to HTML.

use askama::Template;
use tracing::debug;

use crate::github::RepositorySource;
use crate::markdown::{self, CardBody};
use crate::profile::{Profile, OWNER};
use crate::theme::Theme;

pub const NO_REPOSITORIES: &str = "No repositories found or failed to fetch.";
pub const NO_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            BannerKind::Success => "alert success",
            BannerKind::Error => "alert error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub body: CardBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projects {
    pub cards: Vec<ProjectCard>,
    /// Set when the list call failed; the list is then empty.
    pub warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PageState {
    pub theme: Theme,
    pub banner: Option<Banner>,
    pub projects: Projects,
}

#[derive(Template)]
#[template(path = "portfolio.html")]
struct PortfolioTemplate<'a> {
    state: &'a PageState,
    themes: &'a [Theme],
    profile: &'a Profile,
    no_description: &'a str,
    no_repositories: &'a str,
}

/// Lists repositories, then fetches and renders each README in provider
/// order. Never fails: a failed list becomes a warning and no cards.
pub async fn gather_projects(
    source: &dyn RepositorySource,
    username: &str,
    owner_name: &str,
) -> Projects {
    let repos = match source.list_repositories(username).await {
        Ok(repos) => repos,
        Err(e) => {
            return Projects {
                cards: Vec::new(),
                warning: Some(e.to_string()),
            }
        }
    };

    let mut cards = Vec::with_capacity(repos.len());
    for repo in repos {
        let doc = source.fetch_documentation(username, &repo.name).await;
        let body = markdown::render(doc.as_deref(), &repo.name, owner_name);
        if body.is_placeholder() {
            debug!("placeholder summary used: repo={}", repo.name);
        }
        cards.push(ProjectCard {
            name: repo.name,
            html_url: repo.html_url,
            description: repo.description,
            body,
        });
    }

    Projects {
        cards,
        warning: None,
    }
}

pub fn render_page(state: &PageState) -> Result<String, askama::Error> {
    PortfolioTemplate {
        state,
        themes: Theme::all(),
        profile: &OWNER,
        no_description: NO_DESCRIPTION,
        no_repositories: NO_REPOSITORIES,
    }
    .render()
}
