use actix_web::dev::Payload;
use actix_web::http::header::Header;
use actix_web::{FromRequest, HttpRequest, web};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{DecodingKey, EncodingKey, Header as JwtHeader, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::user::model::User;
use crate::user::service::UserService;
use crate::utils::error::CustomError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub exp: usize,
}

/// Issues and verifies the HS256 tokens handed out by `/auth/token`.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: chrono::Duration) -> Self {
        TokenService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, CustomError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| CustomError::InternalServerError("Token expiry overflow".into()))?
            .timestamp()
            .max(0) as usize;

        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            exp: expiration,
        };

        encode(&JwtHeader::default(), &claims, &self.encoding)
            .map_err(|e| CustomError::InternalServerError(format!("Token generation failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, CustomError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| CustomError::UnauthorizedError("Invalid token.".into()))
    }
}

/// The authenticated caller. Taking it as a handler argument makes the route
/// require a valid `Authorization: Bearer` token; reads simply omit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub username: String,
}

impl FromRequest for Principal {
    type Error = CustomError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = Authorization::<Bearer>::parse(req)
            .map(|auth| auth.into_scheme().token().to_string());
        let tokens = req.app_data::<web::Data<TokenService>>().cloned();
        let users = req.app_data::<web::Data<UserService>>().cloned();

        Box::pin(async move {
            let token = token.map_err(|_| {
                CustomError::UnauthorizedError(
                    "Authentication credentials were not provided.".into(),
                )
            })?;

            let (tokens, users) = match (tokens, users) {
                (Some(tokens), Some(users)) => (tokens, users),
                _ => {
                    return Err(CustomError::InternalServerError(
                        "Authentication services are not registered".into(),
                    ));
                }
            };

            let claims = tokens.verify(&token)?;

            // The account may have been removed after the token was issued
            let user = users
                .find_by_id(claims.id)
                .await?
                .ok_or_else(|| CustomError::UnauthorizedError("User not found.".into()))?;

            Ok(Principal {
                id: user.id,
                username: user.username,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user() -> User {
        User {
            id: 7,
            username: "alice".into(),
            password: String::new(),
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn issued_tokens_carry_the_user_identity() {
        let tokens = TokenService::new("secret", Duration::hours(24));
        let token = tokens.issue(&user()).unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = TokenService::new("one", Duration::hours(24)).issue(&user()).unwrap();
        assert!(matches!(
            TokenService::new("two", Duration::hours(24)).verify(&token),
            Err(CustomError::UnauthorizedError(_))
        ));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let tokens = TokenService::new("secret", Duration::hours(-2));
        let token = tokens.issue(&user()).unwrap();
        assert!(tokens.verify(&token).is_err());
    }
}
