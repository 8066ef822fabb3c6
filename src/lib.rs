pub mod app_state;
pub mod comment;
pub mod config;
pub mod database;
pub mod group;
pub mod middleware;
pub mod post;
pub mod router;
pub mod user;
pub mod utils;

pub use app_state::AppServices;
