use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io;
use std::sync::Arc;

use employee_directory::config::Config;
use employee_directory::db::{self, PgRecordStore, RecordStore};
use employee_directory::{handlers, utils};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    // Initialize the database pool
    let pool = db::create_pool(&config).await.map_err(|err| {
        error!("Failed to connect to the database: {}", err);
        io::Error::other(err)
    })?;
    db::run_migrations(&pool).await.map_err(|err| {
        error!("Failed to apply migrations: {}", err);
        io::Error::other(err)
    })?;

    let store: web::Data<dyn RecordStore> =
        web::Data::from(Arc::new(PgRecordStore::new(pool)) as Arc<dyn RecordStore>);
    let session = config.session;

    handlers::employee::warn_public_api();
    info!("Starting server at {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(utils::session::session_middleware(&session))
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(handlers::routes)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
