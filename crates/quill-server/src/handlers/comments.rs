//! Comment handlers

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use tracing::error;

/// `GET /comments` - every comment across all posts, newest first.
pub async fn list_all(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let comments = state.db.list_comments_newest_first().await.map_err(|e| {
        error!("Failed to list comments: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut ctx = tera::Context::new();
    ctx.insert("comments", &comments);

    super::render(&state.templates, "comments.html.tera", &ctx)
}

/// `POST /comments/:comment_id/delete` - remove a comment and redirect to
/// its parent post. Deletion is POST-only so link prefetching or crawling
/// can never trigger it.
pub async fn delete(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> Result<Redirect, StatusCode> {
    let comment = match state.db.get_comment(comment_id).await {
        Ok(Some(comment)) => comment,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to load comment {}: {}", comment_id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    state.db.delete_comment(comment_id).await.map_err(|e| {
        error!("Failed to delete comment {}: {}", comment_id, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Redirect::to(&format!("/{}", comment.post_id)))
}
