#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use yatube_api::AppServices;
use yatube_api::database::{MemoryStore, ResourceStore};
use yatube_api::comment::model::{Comment, NewComment};
use yatube_api::group::model::{Group, NewGroup};
use yatube_api::middleware::auth::TokenService;
use yatube_api::post::post_model::{NewPost, Post};
use yatube_api::user::model::{NewUser, User};

/// Lowest cost bcrypt accepts; keeps registration tests fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub services: AppServices,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let services = AppServices::new(
            store.clone(),
            TokenService::new("test-secret", chrono::Duration::hours(24)),
            TEST_BCRYPT_COST,
        );
        TestContext { store, services }
    }

    /// Inserts a user directly and returns it with a bearer header value.
    pub async fn user(&self, username: &str) -> (User, String) {
        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                password: "unused".to_string(),
                date_joined: Utc::now(),
            })
            .await
            .unwrap();
        let token = self.services.tokens.issue(&user).unwrap();
        (user, format!("Bearer {}", token))
    }

    pub async fn group(&self, slug: &str) -> Group {
        self.store
            .insert_group(NewGroup {
                title: format!("Group {}", slug),
                slug: slug.to_string(),
                description: format!("All about {}", slug),
            })
            .await
            .unwrap()
    }

    pub async fn post(&self, author: &User, text: &str) -> Post {
        self.store
            .insert_post(NewPost {
                text: text.to_string(),
                author_id: author.id,
                author: author.username.clone(),
                image: None,
                group: None,
                pub_date: Utc::now(),
            })
            .await
            .unwrap()
    }

    pub async fn comment(&self, post: &Post, author: &User, text: &str) -> Comment {
        self.store
            .insert_comment(NewComment {
                post_id: post.id,
                author_id: author.id,
                author: author.username.clone(),
                text: text.to_string(),
                created: Utc::now(),
            })
            .await
            .unwrap()
    }
}

/// Builds the full application service for a `TestContext`.
macro_rules! init_app {
    ($ctx:expr) => {{
        let services = $ctx.services.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(move |cfg| services.configure(cfg))
                .default_service(actix_web::web::to(
                    yatube_api::middleware::not_found::not_found,
                )),
        )
        .await
    }};
}
