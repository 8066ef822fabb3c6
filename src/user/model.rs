use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::validation::Field;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,
    pub username: String,
    pub password: String,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub date_joined: DateTime<Utc>,
}

impl NewUser {
    pub fn with_id(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            date_joined: self.date_joined,
        }
    }
}

/// Body of both `/auth/register` and `/auth/token`.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Field<String>,
    #[serde(default)]
    pub password: Field<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UserView {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            username: user.username,
        }
    }
}
