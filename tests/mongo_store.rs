//! Runs against a live MongoDB only when `MONGODB_TEST_URI` is set.

use chrono::Utc;
use futures_util::future::join;
use mongodb::Client;
use yatube_api::database::{self, MongoStore, ResourceStore};
use yatube_api::group::model::NewGroup;
use yatube_api::user::model::NewUser;
use yatube_api::utils::error::CustomError;

async fn test_store() -> Option<(Client, String, MongoStore)> {
    let uri = match std::env::var("MONGODB_TEST_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("Skipping test: MONGODB_TEST_URI is not set");
            return None;
        }
    };

    let client = match database::connect_to_mongo(&uri, "yatube-api-tests").await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Skipping test - MongoDB not available: {}", e);
            return None;
        }
    };

    let name = format!(
        "yatube_test_{}",
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );
    let store = MongoStore::new(&client, &name);
    store.ensure_indexes().await.unwrap();
    Some((client, name, store))
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "hashed".to_string(),
        date_joined: Utc::now(),
    }
}

#[actix_web::test]
async fn concurrent_registrations_of_one_username_yield_a_conflict() {
    let Some((client, name, store)) = test_store().await else {
        return;
    };

    let (first, second) = join(
        store.insert_user(new_user("alice")),
        store.insert_user(new_user("alice")),
    )
    .await;

    let conflicts = [&first, &second]
        .iter()
        .filter(|result| matches!(result, Err(CustomError::ConflictError(_))))
        .count();
    let created = [&first, &second].iter().filter(|result| result.is_ok()).count();
    assert_eq!((created, conflicts), (1, 1));

    client.database(&name).drop().await.unwrap();
}

#[actix_web::test]
async fn duplicate_group_slug_is_a_conflict() {
    let Some((client, name, store)) = test_store().await else {
        return;
    };

    let group = || NewGroup {
        title: "Cats".to_string(),
        slug: "cats".to_string(),
        description: "All about cats".to_string(),
    };
    store.insert_group(group()).await.unwrap();
    let err = store.insert_group(group()).await.unwrap_err();
    assert!(matches!(err, CustomError::ConflictError(_)));

    client.database(&name).drop().await.unwrap();
}
