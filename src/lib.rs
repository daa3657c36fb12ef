use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::checklist::{record_collection_for_checklist, set_completion};
use crate::routes::competitor_product::create_competitor_product;
use crate::routes::order::{create_order, get_order};
use crate::routes::recovery::{get_recovery, list_recoveries_by_commercial, record_collection};
use crate::routes::visit::{
    cancel_visit, create_visit, get_visit, list_visits_by_commercial, recovery_report,
};

pub mod db;
pub mod domain;
pub mod dto;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(create_visit)
                    // registered before the parameterized visit routes so the
                    // literal segment wins
                    .service(recovery_report)
                    .service(get_visit)
                    .service(list_visits_by_commercial)
                    .service(cancel_visit)
                    .service(record_collection)
                    .service(list_recoveries_by_commercial)
                    .service(get_recovery)
                    .service(record_collection_for_checklist)
                    .service(set_completion)
                    .service(create_order)
                    .service(get_order)
                    .service(create_competitor_product),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
