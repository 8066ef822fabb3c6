use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use env_logger::Env;
use log::info;
use serde_json::json;

use yatube_api::AppServices;
use yatube_api::config::{AppConfig, StoreBackend};
use yatube_api::database::{self, MemoryStore, MongoStore, ResourceStore};
use yatube_api::middleware::not_found::not_found;
use yatube_api::utils::helpers::service_name;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Yatube API is running",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": service_name(),
    }))
}

async fn build_store(config: &AppConfig) -> std::io::Result<Arc<dyn ResourceStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Mongo => {
            let client = database::connect_to_mongo(&config.mongodb_uri, &config.service_name)
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;

            let store = MongoStore::new(&client, &config.database_name);
            store
                .ensure_indexes()
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;

            Ok(Arc::new(store))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let store = build_store(&config).await?;
    let services = AppServices::from_config(store, &config);

    info!(
        "Starting {} on http://{}:{}",
        config.service_name, config.host, config.port
    );

    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(|cfg| services.configure(cfg))
            .service(default)
            .default_service(web::to(not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
