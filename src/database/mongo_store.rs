use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};
use serde::Deserialize;

use crate::comment::model::{Comment, NewComment};
use crate::database::ResourceStore;
use crate::group::model::{Group, NewGroup};
use crate::post::post_model::{NewPost, Post};
use crate::user::model::{NewUser, User};
use crate::utils::error::CustomError;

#[derive(Debug, Deserialize)]
struct Counter {
    seq: i64,
}

pub struct MongoStore {
    groups: Collection<Group>,
    posts: Collection<Post>,
    comments: Collection<Comment>,
    users: Collection<User>,
    counters: Collection<Counter>,
}

const DUPLICATE_KEY: i32 = 11000;

fn db_error(action: &'static str) -> impl Fn(mongodb::error::Error) -> CustomError {
    move |e| CustomError::InternalServerError(format!("Failed to {}: {}", action, e))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

/// Like `db_error`, but a unique index violation becomes a 409 with `conflict`.
fn insert_error(
    action: &'static str,
    conflict: String,
) -> impl FnOnce(mongodb::error::Error) -> CustomError {
    move |e| {
        if is_duplicate_key(&e) {
            CustomError::ConflictError(conflict)
        } else {
            db_error(action)(e)
        }
    }
}

impl MongoStore {
    pub fn new(client: &Client, database_name: &str) -> Self {
        let db = client.database(database_name);
        MongoStore {
            groups: db.collection::<Group>("groups"),
            posts: db.collection::<Post>("posts"),
            comments: db.collection::<Comment>("comments"),
            users: db.collection::<User>("users"),
            counters: db.collection::<Counter>("counters"),
        }
    }

    /// Creates the indexes the store relies on. Safe to run on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), CustomError> {
        let unique = IndexOptions::builder().unique(true).build();

        self.users
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "username": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await
            .map_err(db_error("create user index"))?;

        self.groups
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(unique)
                    .build(),
            )
            .await
            .map_err(db_error("create group index"))?;

        self.comments
            .create_index(IndexModel::builder().keys(doc! { "post_id": 1, "_id": 1 }).build())
            .await
            .map_err(db_error("create comment index"))?;

        Ok(())
    }

    /// Integer id sequences live in the `counters` collection, one document per entity.
    async fn next_id(&self, sequence: &str) -> Result<i64, CustomError> {
        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": sequence }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error("allocate id"))?
            .ok_or_else(|| {
                CustomError::InternalServerError(format!("Counter '{}' missing", sequence))
            })?;

        Ok(counter.seq)
    }
}

#[async_trait]
impl ResourceStore for MongoStore {
    async fn list_groups(&self) -> Result<Vec<Group>, CustomError> {
        let cursor = self
            .groups
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(db_error("fetch groups"))?;

        cursor.try_collect().await.map_err(db_error("collect groups"))
    }

    async fn get_group(&self, id: i64) -> Result<Option<Group>, CustomError> {
        self.groups
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error("fetch group"))
    }

    async fn insert_group(&self, group: NewGroup) -> Result<Group, CustomError> {
        let group = group.with_id(self.next_id("groups").await?);
        self.groups
            .insert_one(&group)
            .await
            .map_err(insert_error(
                "create group",
                format!("Group with slug '{}' already exists", group.slug),
            ))?;

        Ok(group)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, CustomError> {
        let cursor = self
            .posts
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(db_error("fetch posts"))?;

        cursor.try_collect().await.map_err(db_error("collect posts"))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, CustomError> {
        self.posts
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error("fetch post"))
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, CustomError> {
        let post = post.with_id(self.next_id("posts").await?);
        self.posts
            .insert_one(&post)
            .await
            .map_err(db_error("create post"))?;

        Ok(post)
    }

    async fn update_post(&self, post: &Post) -> Result<(), CustomError> {
        let result = self
            .posts
            .replace_one(doc! { "_id": post.id }, post)
            .await
            .map_err(db_error("update post"))?;

        if result.matched_count == 0 {
            return Err(CustomError::NotFoundError("Post not found.".into()));
        }

        Ok(())
    }

    async fn delete_post(&self, id: i64) -> Result<bool, CustomError> {
        let result = self
            .posts
            .delete_one(doc! { "_id": id })
            .await
            .map_err(db_error("delete post"))?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        self.comments
            .delete_many(doc! { "post_id": id })
            .await
            .map_err(db_error("delete post comments"))?;

        Ok(true)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, CustomError> {
        let cursor = self
            .comments
            .find(doc! { "post_id": post_id })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(db_error("fetch comments"))?;

        cursor.try_collect().await.map_err(db_error("collect comments"))
    }

    async fn get_comment(&self, post_id: i64, id: i64) -> Result<Option<Comment>, CustomError> {
        self.comments
            .find_one(doc! { "_id": id, "post_id": post_id })
            .await
            .map_err(db_error("fetch comment"))
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, CustomError> {
        let comment = comment.with_id(self.next_id("comments").await?);
        self.comments
            .insert_one(&comment)
            .await
            .map_err(db_error("add comment"))?;

        Ok(comment)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<(), CustomError> {
        let result = self
            .comments
            .replace_one(doc! { "_id": comment.id, "post_id": comment.post_id }, comment)
            .await
            .map_err(db_error("update comment"))?;

        if result.matched_count == 0 {
            return Err(CustomError::NotFoundError("Comment not found.".into()));
        }

        Ok(())
    }

    async fn delete_comment(&self, post_id: i64, id: i64) -> Result<bool, CustomError> {
        let result = self
            .comments
            .delete_one(doc! { "_id": id, "post_id": post_id })
            .await
            .map_err(db_error("delete comment"))?;

        Ok(result.deleted_count > 0)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, CustomError> {
        self.users
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error("fetch user"))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, CustomError> {
        self.users
            .find_one(doc! { "username": username })
            .await
            .map_err(db_error("fetch user"))
    }

    /// The unique username index decides between concurrent registrations.
    async fn insert_user(&self, user: NewUser) -> Result<User, CustomError> {
        let user = user.with_id(self.next_id("users").await?);
        self.users
            .insert_one(&user)
            .await
            .map_err(insert_error(
                "create user",
                "A user with that username already exists.".into(),
            ))?;

        Ok(user)
    }
}
