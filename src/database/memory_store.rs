use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::comment::model::{Comment, NewComment};
use crate::database::ResourceStore;
use crate::group::model::{Group, NewGroup};
use crate::post::post_model::{NewPost, Post};
use crate::user::model::{NewUser, User};
use crate::utils::error::CustomError;

#[derive(Default)]
struct Tables {
    groups: Vec<Group>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    users: Vec<User>,
    last_group_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
    last_user_id: i64,
}

/// Process-local store. Vectors keep insertion order, which is also id order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn list_groups(&self) -> Result<Vec<Group>, CustomError> {
        Ok(self.tables.read().await.groups.clone())
    }

    async fn get_group(&self, id: i64) -> Result<Option<Group>, CustomError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|g| g.id == id).cloned())
    }

    async fn insert_group(&self, group: NewGroup) -> Result<Group, CustomError> {
        let mut tables = self.tables.write().await;
        if tables.groups.iter().any(|g| g.slug == group.slug) {
            return Err(CustomError::ConflictError(format!(
                "Group with slug '{}' already exists",
                group.slug
            )));
        }
        let group = group.with_id(next_id(&mut tables.last_group_id));
        tables.groups.push(group.clone());
        Ok(group)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, CustomError> {
        Ok(self.tables.read().await.posts.clone())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, CustomError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, CustomError> {
        let mut tables = self.tables.write().await;
        let post = post.with_id(next_id(&mut tables.last_post_id));
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, post: &Post) -> Result<(), CustomError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| CustomError::NotFoundError("Post not found.".into()))?;
        *stored = post.clone();
        Ok(())
    }

    async fn delete_post(&self, id: i64) -> Result<bool, CustomError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        let deleted = tables.posts.len() < before;
        if deleted {
            tables.comments.retain(|c| c.post_id != id);
        }
        Ok(deleted)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, CustomError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn get_comment(&self, post_id: i64, id: i64) -> Result<Option<Comment>, CustomError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .find(|c| c.id == id && c.post_id == post_id)
            .cloned())
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, CustomError> {
        let mut tables = self.tables.write().await;
        let comment = comment.with_id(next_id(&mut tables.last_comment_id));
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<(), CustomError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id && c.post_id == comment.post_id)
            .ok_or_else(|| CustomError::NotFoundError("Comment not found.".into()))?;
        *stored = comment.clone();
        Ok(())
    }

    async fn delete_comment(&self, post_id: i64, id: i64) -> Result<bool, CustomError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables
            .comments
            .retain(|c| !(c.id == id && c.post_id == post_id));
        Ok(tables.comments.len() < before)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, CustomError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, CustomError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, CustomError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(CustomError::ConflictError(
                "A user with that username already exists.".into(),
            ));
        }
        let user = user.with_id(next_id(&mut tables.last_user_id));
        tables.users.push(user.clone());
        Ok(user)
    }
}
