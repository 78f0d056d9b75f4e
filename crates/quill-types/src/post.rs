//! Post types

use serde::{Deserialize, Serialize};

/// A blog entry with a title and body text.
///
/// Posts are never created or edited over HTTP; they only enter the
/// database through out-of-band seeding. The id is assigned by SQLite
/// and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Post \"{}\">", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_shows_title() {
        let post = Post {
            id: 1,
            title: "Hello".to_string(),
            content: "World".to_string(),
        };
        assert_eq!(post.to_string(), "<Post \"Hello\">");
    }

    #[test]
    fn test_serde_round_trip() {
        let post = Post {
            id: 7,
            title: "t".to_string(),
            content: "c".to_string(),
        };
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(post, back);
    }
}
