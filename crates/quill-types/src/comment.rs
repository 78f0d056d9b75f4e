//! Comment types

use serde::{Deserialize, Serialize};

/// A text reply attached to exactly one post.
///
/// `post_id` must always resolve to an existing `Post` at write time;
/// the schema enforces this with a foreign key. Deleting a comment
/// never touches its parent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
}

/// Form payload submitted from a post's detail page.
///
/// The field is deliberately unvalidated: empty is allowed, and a
/// missing field is treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub content: String,
}
