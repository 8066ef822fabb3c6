use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::validation::Field;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub author_id: i64,
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl NewComment {
    pub fn with_id(self, id: i64) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            author_id: self.author_id,
            author: self.author,
            text: self.text,
            created: self.created,
        }
    }
}

/// `post` and `author` come from the path and the token, never from here.
#[derive(Debug, Default, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: Field<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentView {
    pub id: i64,
    pub author: String,
    pub post: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        CommentView {
            id: comment.id,
            author: comment.author,
            post: comment.post_id,
            text: comment.text,
            created: comment.created,
        }
    }
}
