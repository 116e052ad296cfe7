use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskvault::auth::{AuthService, Authenticator, TokenService};
use taskvault::config::Config;
use taskvault::routes;
use taskvault::store::{PgTaskStore, PgUserStore, TaskStore, UserStore};
use taskvault::tasks::TaskService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Explicit composition: stores into services, services into the app.
    let user_store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let task_store: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool));

    let token_service = TokenService::new(config.jwt_secret.clone(), config.token_ttl_hours);
    let auth_service = web::Data::new(AuthService::new(user_store, token_service.clone()));
    let task_service = web::Data::new(TaskService::new(task_store));

    log::info!("Starting TaskVault server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(auth_service.clone())
            .app_data(task_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .wrap(Authenticator::new(token_service.clone()))
            .configure(routes::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
