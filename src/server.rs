use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::github::RepositorySource;
use crate::notifier::{ContactMessage, Notify};
use crate::page::{self, Banner, PageState};
use crate::profile::OWNER;
use crate::theme::{self, Theme};

const MISSING_FIELDS: &str = "Please fill in all fields.";
const SENT: &str = "Message sent successfully! I will get back to you soon.";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn RepositorySource>,
    pub notifier: Arc<dyn Notify>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub theme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// `None` when any field is blank. The body is passed on untouched.
    pub fn into_message(self) -> Option<ContactMessage> {
        let name = self.name.trim();
        let sender_email = self.email.trim();
        if name.is_empty() || sender_email.is_empty() || self.message.trim().is_empty() {
            return None;
        }
        Some(ContactMessage {
            name: name.to_string(),
            sender_email: sender_email.to_string(),
            body: self.message,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_page).post(submit_contact))
        .route("/profile-image", get(profile_image))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn show_page(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let theme = theme::theme_from_query(query.theme.as_deref());
    render(&state, theme, None).await
}

async fn submit_contact(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    let theme = theme::theme_from_query(form.theme.as_deref());
    let banner = match form.into_message() {
        None => {
            tracing::debug!("contact form rejected: missing fields");
            Banner::error(MISSING_FIELDS)
        }
        Some(contact) => match state.notifier.send(&contact).await {
            Ok(()) => Banner::success(SENT),
            Err(e) => Banner::error(format!("Error sending email: {e}")),
        },
    };
    render(&state, theme, Some(banner)).await
}

async fn render(state: &AppState, theme: Theme, banner: Option<Banner>) -> Response {
    let projects = page::gather_projects(
        state.source.as_ref(),
        &state.config.github.username,
        OWNER.first_name,
    )
    .await;

    let page_state = PageState {
        theme,
        banner,
        projects,
    };
    match page::render_page(&page_state) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("page render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

async fn profile_image(State(state): State<AppState>) -> Response {
    let path = &state.config.profile_image;
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, image_content_type(path))], bytes).into_response(),
        Err(e) => {
            tracing::warn!("profile image unavailable: path={} err={}", path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn image_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/jpeg",
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            theme: None,
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn blank_fields_produce_no_message() {
        assert!(form("", "a@b.c", "hi").into_message().is_none());
        assert!(form("Ada", "  ", "hi").into_message().is_none());
        assert!(form("Ada", "a@b.c", "\n").into_message().is_none());
    }

    #[test]
    fn complete_form_trims_identity_but_not_body() {
        let message = form(" Ada ", "a@b.c ", " hi\n").into_message().unwrap();
        assert_eq!(message.name, "Ada");
        assert_eq!(message.sender_email, "a@b.c");
        assert_eq!(message.body, " hi\n");
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(image_content_type(Path::new("me.PNG")), "image/png");
        assert_eq!(image_content_type(Path::new("123444116.jpg")), "image/jpeg");
        assert_eq!(image_content_type(Path::new("noext")), "image/jpeg");
    }
}
