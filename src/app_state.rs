use std::sync::Arc;

use actix_web::web;

use crate::comment::service::CommentService;
use crate::config::AppConfig;
use crate::database::ResourceStore;
use crate::group::service::GroupService;
use crate::middleware::auth::TokenService;
use crate::middleware::not_found::{json_error, path_error};
use crate::post::post_service::PostService;
use crate::router::index::routes;
use crate::user::service::UserService;
use crate::utils::helpers::init_service_name;

/// Services shared by every worker, wired to one store.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn ResourceStore>,
    pub tokens: web::Data<TokenService>,
    pub users: web::Data<UserService>,
    pub groups: web::Data<GroupService>,
    pub posts: web::Data<PostService>,
    pub comments: web::Data<CommentService>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ResourceStore>, tokens: TokenService, password_cost: u32) -> Self {
        AppServices {
            users: web::Data::new(UserService::new(
                store.clone(),
                tokens.clone(),
                password_cost,
            )),
            tokens: web::Data::new(tokens),
            groups: web::Data::new(GroupService::new(store.clone())),
            posts: web::Data::new(PostService::new(store.clone())),
            comments: web::Data::new(CommentService::new(store.clone())),
            store,
        }
    }

    pub fn from_config(store: Arc<dyn ResourceStore>, config: &AppConfig) -> Self {
        init_service_name(&config.service_name);
        Self::new(
            store,
            TokenService::new(&config.jwt_secret, config.token_ttl),
            config.bcrypt_cost,
        )
    }

    /// Registers shared data, extractor error handlers and all routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.users.clone())
            .app_data(self.groups.clone())
            .app_data(self.posts.clone())
            .app_data(self.comments.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .configure(routes);
    }
}
