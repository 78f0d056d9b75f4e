//! HTTP handlers

pub mod comments;
pub mod health;
pub mod posts;

pub use health::health;

use axum::{http::StatusCode, response::Html};

/// Render a template into an HTML response. Render failures are a server
/// fault, never a client one.
pub(crate) fn render(
    templates: &tera::Tera,
    name: &str,
    ctx: &tera::Context,
) -> Result<Html<String>, StatusCode> {
    match templates.render(name, ctx) {
        Ok(body) => Ok(Html(body)),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
