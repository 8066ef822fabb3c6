use std::sync::Arc;

use chrono::Utc;

use crate::comment::model::{Comment, CommentRequest, NewComment};
use crate::database::ResourceStore;
use crate::middleware::auth::Principal;
use crate::middleware::permissions::{ResourceKind, ensure_can_mutate};
use crate::post::post_model::Post;
use crate::utils::error::CustomError;
use crate::utils::validation::{FieldErrors, UpdateMode, text_field};

pub const POST_OR_COMMENT_NOT_FOUND: &str = "Post or comment not found.";

fn not_found() -> CustomError {
    CustomError::NotFoundError(POST_OR_COMMENT_NOT_FOUND.into())
}

/// Every operation resolves the parent post first, then looks the comment
/// up inside that post only.
pub struct CommentService {
    store: Arc<dyn ResourceStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        CommentService { store }
    }

    async fn resolve_post(&self, post_id: i64) -> Result<Post, CustomError> {
        self.store.get_post(post_id).await?.ok_or_else(not_found)
    }

    async fn resolve_comment(&self, post_id: i64, id: i64) -> Result<Comment, CustomError> {
        let post = self.resolve_post(post_id).await?;
        self.store
            .get_comment(post.id, id)
            .await?
            .ok_or_else(not_found)
    }

    /// Comments of one post, oldest first.
    pub async fn get_comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, CustomError> {
        let post = self.resolve_post(post_id).await?;
        self.store.list_comments(post.id).await
    }

    pub async fn get_comment(&self, post_id: i64, id: i64) -> Result<Comment, CustomError> {
        self.resolve_comment(post_id, id).await
    }

    pub async fn add_comment(
        &self,
        principal: &Principal,
        post_id: i64,
        request: CommentRequest,
    ) -> Result<Comment, CustomError> {
        let post = self.resolve_post(post_id).await?;
        let text = validate_text(request, UpdateMode::Full)?;

        let comment = self
            .store
            .insert_comment(NewComment {
                post_id: post.id,
                author_id: principal.id,
                author: principal.username.clone(),
                text: text.unwrap_or_default(),
                created: Utc::now(),
            })
            .await?;

        log::info!(
            "user {} commented {} on post {}",
            principal.id,
            comment.id,
            post.id
        );
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        principal: &Principal,
        post_id: i64,
        id: i64,
        request: CommentRequest,
        mode: UpdateMode,
    ) -> Result<Comment, CustomError> {
        let mut comment = self.resolve_comment(post_id, id).await?;
        ensure_can_mutate(principal, comment.author_id, ResourceKind::Comment, comment.id)?;

        if let Some(text) = validate_text(request, mode)? {
            comment.text = text;
        }
        self.store.update_comment(&comment).await?;

        log::info!("user {} updated comment {}", principal.id, comment.id);
        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        principal: &Principal,
        post_id: i64,
        id: i64,
    ) -> Result<(), CustomError> {
        let comment = self.resolve_comment(post_id, id).await?;
        ensure_can_mutate(principal, comment.author_id, ResourceKind::Comment, comment.id)?;

        if !self
            .store
            .delete_comment(comment.post_id, comment.id)
            .await?
        {
            return Err(not_found());
        }

        log::info!("user {} deleted comment {}", principal.id, comment.id);
        Ok(())
    }
}

fn validate_text(request: CommentRequest, mode: UpdateMode) -> Result<Option<String>, CustomError> {
    let mut errors = FieldErrors::default();
    let text = text_field(&mut errors, "text", request.text, !mode.is_partial());
    errors.into_result()?;
    Ok(text)
}
