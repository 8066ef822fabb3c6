pub mod db;
pub mod memory_store;
pub mod mongo_store;

pub use db::connect_to_mongo;
pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;

use async_trait::async_trait;

use crate::comment::model::{Comment, NewComment};
use crate::group::model::{Group, NewGroup};
use crate::post::post_model::{NewPost, Post};
use crate::user::model::{NewUser, User};
use crate::utils::error::CustomError;

/// Record store behind every handler. Ids are assigned in insertion order,
/// and list operations return records in that order.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, CustomError>;
    async fn get_group(&self, id: i64) -> Result<Option<Group>, CustomError>;
    async fn insert_group(&self, group: NewGroup) -> Result<Group, CustomError>;

    async fn list_posts(&self) -> Result<Vec<Post>, CustomError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, CustomError>;
    async fn insert_post(&self, post: NewPost) -> Result<Post, CustomError>;
    /// Replaces the stored record with the same id.
    async fn update_post(&self, post: &Post) -> Result<(), CustomError>;
    /// Deletes the post together with its comments.
    async fn delete_post(&self, id: i64) -> Result<bool, CustomError>;

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, CustomError>;
    /// Scoped lookup: a comment under another post is `None`.
    async fn get_comment(&self, post_id: i64, id: i64) -> Result<Option<Comment>, CustomError>;
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, CustomError>;
    async fn update_comment(&self, comment: &Comment) -> Result<(), CustomError>;
    async fn delete_comment(&self, post_id: i64, id: i64) -> Result<bool, CustomError>;

    async fn get_user(&self, id: i64) -> Result<Option<User>, CustomError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, CustomError>;
    async fn insert_user(&self, user: NewUser) -> Result<User, CustomError>;
}
