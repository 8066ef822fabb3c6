use std::sync::Arc;

use chrono::Utc;

use crate::database::ResourceStore;
use crate::middleware::auth::Principal;
use crate::middleware::permissions::{ResourceKind, ensure_can_mutate};
use crate::post::post_model::{NewPost, Post, PostRequest};
use crate::utils::error::CustomError;
use crate::utils::validation::{Field, FieldErrors, NOT_A_STRING, UpdateMode, text_field};

pub const POST_NOT_FOUND: &str = "Post not found.";

/// Validated subset of a `PostRequest`; `None` leaves the stored value alone.
#[derive(Debug, Default)]
struct PostChanges {
    text: Option<String>,
    group: Option<Option<i64>>,
    image: Option<Option<String>>,
}

impl PostChanges {
    fn apply(self, post: &mut Post) {
        if let Some(text) = self.text {
            post.text = text;
        }
        if let Some(group) = self.group {
            post.group = group;
        }
        if let Some(image) = self.image {
            post.image = image;
        }
    }
}

pub struct PostService {
    store: Arc<dyn ResourceStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        PostService { store }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, CustomError> {
        self.store.list_posts().await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, CustomError> {
        self.store
            .get_post(id)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(POST_NOT_FOUND.into()))
    }

    pub async fn create_post(
        &self,
        principal: &Principal,
        request: PostRequest,
    ) -> Result<Post, CustomError> {
        let changes = self.validate(request, UpdateMode::Full).await?;

        let post = self
            .store
            .insert_post(NewPost {
                text: changes.text.unwrap_or_default(),
                author_id: principal.id,
                author: principal.username.clone(),
                image: changes.image.flatten(),
                group: changes.group.flatten(),
                pub_date: Utc::now(),
            })
            .await?;

        log::info!("user {} created post {}", principal.id, post.id);
        Ok(post)
    }

    pub async fn update_post(
        &self,
        principal: &Principal,
        id: i64,
        request: PostRequest,
        mode: UpdateMode,
    ) -> Result<Post, CustomError> {
        let mut post = self.get_post(id).await?;
        ensure_can_mutate(principal, post.author_id, ResourceKind::Post, post.id)?;

        let changes = self.validate(request, mode).await?;
        changes.apply(&mut post);
        self.store.update_post(&post).await?;

        log::info!("user {} updated post {}", principal.id, post.id);
        Ok(post)
    }

    pub async fn delete_post(&self, principal: &Principal, id: i64) -> Result<(), CustomError> {
        let post = self.get_post(id).await?;
        ensure_can_mutate(principal, post.author_id, ResourceKind::Post, post.id)?;

        if !self.store.delete_post(post.id).await? {
            return Err(CustomError::NotFoundError(POST_NOT_FOUND.into()));
        }

        log::info!("user {} deleted post {}", principal.id, post.id);
        Ok(())
    }

    /// `UpdateMode::Full` (create and PUT) requires `text`; `Partial` accepts any subset.
    async fn validate(
        &self,
        request: PostRequest,
        mode: UpdateMode,
    ) -> Result<PostChanges, CustomError> {
        let mut errors = FieldErrors::default();

        let text = text_field(&mut errors, "text", request.text, !mode.is_partial());

        let group = match request.group {
            Field::Absent => None,
            Field::Null => Some(None),
            Field::Value(group_id) => {
                if self.store.get_group(group_id).await?.is_none() {
                    errors.add(
                        "group",
                        format!("Invalid pk \"{}\" - object does not exist.", group_id),
                    );
                }
                Some(Some(group_id))
            }
            Field::Invalid(kind) => {
                errors.add(
                    "group",
                    format!("Incorrect type. Expected pk value, received {}.", kind),
                );
                None
            }
        };

        // A blank image reference clears it
        let image = match request.image {
            Field::Absent => None,
            Field::Null => Some(None),
            Field::Value(reference) => Some(Some(reference).filter(|r| !r.trim().is_empty())),
            Field::Invalid(_) => {
                errors.add("image", NOT_A_STRING);
                None
            }
        };

        errors.into_result()?;

        Ok(PostChanges {
            text,
            group,
            image,
        })
    }
}
