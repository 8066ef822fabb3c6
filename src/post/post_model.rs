use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::validation::Field;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub author: String,
    pub image: Option<String>,
    pub group: Option<i64>,
    pub pub_date: DateTime<Utc>,
}

/// A post before the store has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub author_id: i64,
    pub author: String,
    pub image: Option<String>,
    pub group: Option<i64>,
    pub pub_date: DateTime<Utc>,
}

impl NewPost {
    pub fn with_id(self, id: i64) -> Post {
        Post {
            id,
            text: self.text,
            author_id: self.author_id,
            author: self.author,
            image: self.image,
            group: self.group,
            pub_date: self.pub_date,
        }
    }
}

/// Request body for create, update and partial update. `author` and
/// `pub_date` are not part of it, so client-sent values are dropped.
#[derive(Debug, Default, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub text: Field<String>,
    #[serde(default)]
    pub group: Field<i64>,
    #[serde(default)]
    pub image: Field<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PostView {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub image: Option<String>,
    pub group: Option<i64>,
    pub pub_date: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        PostView {
            id: post.id,
            text: post.text,
            author: post.author,
            image: post.image,
            group: post.group,
            pub_date: post.pub_date,
        }
    }
}
