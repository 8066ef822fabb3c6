use std::sync::Arc;

use actix_web::web;
use chrono::Utc;

use crate::database::ResourceStore;
use crate::middleware::auth::TokenService;
use crate::user::model::{CredentialsRequest, NewUser, User};
use crate::utils::error::CustomError;
use crate::utils::validation::{FieldErrors, text_field};
use crate::utils::{hashing, password_validation};

pub struct UserService {
    store: Arc<dyn ResourceStore>,
    tokens: TokenService,
    password_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn ResourceStore>, tokens: TokenService, password_cost: u32) -> Self {
        UserService {
            store,
            tokens,
            password_cost,
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, CustomError> {
        self.store.get_user(id).await
    }

    pub async fn create_user(&self, request: CredentialsRequest) -> Result<User, CustomError> {
        let mut errors = FieldErrors::default();
        let username = text_field(&mut errors, "username", request.username, true);
        let password = text_field(&mut errors, "password", request.password, true);

        if let Some(username) = &username {
            if let Err(msg) = password_validation::validate_username(username) {
                errors.add("username", msg);
            }
        }
        if let Some(password) = &password {
            if let Err(msg) = password_validation::validate_password(password) {
                errors.add("password", msg);
            }
        }
        let (Some(username), Some(password)) = (username, password) else {
            return Err(CustomError::ValidationError(errors));
        };
        errors.into_result()?;

        let cost = self.password_cost;
        // bcrypt runs on the blocking pool
        let hashed_password = web::block(move || hashing::hash_password(&password, cost))
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        let user = self
            .store
            .insert_user(NewUser {
                username,
                password: hashed_password,
                date_joined: Utc::now(),
            })
            .await?;

        log::info!("registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, CustomError> {
        let invalid = || {
            CustomError::UnauthorizedError("Unable to log in with provided credentials.".into())
        };

        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        let password = password.to_string();
        let hashed = user.password.clone();
        // bcrypt runs on the blocking pool
        let matches = web::block(move || hashing::verify_password(&password, &hashed))
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        if !matches {
            return Err(invalid());
        }

        Ok(user)
    }

    /// Exchanges a username and password for a bearer token.
    pub async fn obtain_token(&self, request: CredentialsRequest) -> Result<String, CustomError> {
        let mut errors = FieldErrors::default();
        let username = text_field(&mut errors, "username", request.username, true);
        let password = text_field(&mut errors, "password", request.password, true);
        let (Some(username), Some(password)) = (username, password) else {
            return Err(CustomError::ValidationError(errors));
        };

        let user = self.authenticate_user(&username, &password).await?;
        self.tokens.issue(&user)
    }
}
