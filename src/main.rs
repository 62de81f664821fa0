mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{
    dev::Service,
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::database::{Collections, DocumentStore, MongoDB};
use crate::services::{PaymentProcessor, StripeClient};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Scholar Beacon API...");
    log::info!("📊 Database: {} ({})", config.redacted_database_url(), config.database_name);

    // Initialize MongoDB connection
    let mongo = MongoDB::new(&config.database_url, &config.database_name)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to connect to MongoDB: {}", e)))?;

    mongo
        .ping()
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    log::info!("✅ Pinged your deployment. MongoDB connected successfully");

    let collections = web::Data::new(Collections::new(Arc::new(mongo.clone())));

    let processor: Arc<dyn PaymentProcessor> =
        Arc::new(StripeClient::new(&config.payment_api_base, &config.payment_secret_key));
    let payments: web::Data<dyn PaymentProcessor> = web::Data::from(processor);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(collections.clone())
            .app_data(payments.clone())
            .wrap(Compress::default())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap_fn(|req, srv| {
                utils::metrics::increment_request_count();
                srv.call(req)
            })
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // Server stopped (SIGINT/SIGTERM): release pooled connections
    log::info!("🛑 Server stopped, closing MongoDB connections");
    mongo.shutdown().await;

    Ok(())
}
