//! Post handlers

use crate::AppState;
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use quill_types::NewComment;
use tracing::error;

/// `GET /` - every post, in implementation order. An empty store renders
/// an empty list.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let posts = state.db.list_posts().await.map_err(|e| {
        error!("Failed to list posts: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut ctx = tera::Context::new();
    ctx.insert("posts", &posts);

    super::render(&state.templates, "index.html.tera", &ctx)
}

/// `GET /:post_id` - one post with its comments.
pub async fn show(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Html<String>, StatusCode> {
    let post = match state.db.get_post(post_id).await {
        Ok(Some(post)) => post,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to load post {}: {}", post_id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let comments = state.db.comments_for_post(post_id).await.map_err(|e| {
        error!("Failed to load comments for post {}: {}", post_id, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut ctx = tera::Context::new();
    ctx.insert("post", &post);
    ctx.insert("comments", &comments);

    super::render(&state.templates, "post.html.tera", &ctx)
}

/// `POST /:post_id` - attach a comment to the post, then redirect back to
/// the detail page so a reload re-issues a safe read instead of repeating
/// the write.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Form(form): Form<NewComment>,
) -> Result<Redirect, StatusCode> {
    match state.db.get_post(post_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to load post {}: {}", post_id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    state
        .db
        .create_comment(post_id, &form.content)
        .await
        .map_err(|e| {
            error!("Failed to create comment on post {}: {}", post_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Redirect::to(&format!("/{post_id}")))
}
