use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use larder::config::Config;
use larder::vision::{FoodRecognizer, MockRecognizer};
use larder::{db, handlers, workers};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().expect("Invalid configuration");

    log::info!("Starting Larder API server on port {}", config.port);

    let pool = db::create_pool(&config.database_url);
    let queue = if config.workers_enabled {
        Some(workers::start_worker_pool(&config.database_url).await)
    } else {
        None
    };
    let recognizer: Arc<dyn FoodRecognizer> = Arc::new(MockRecognizer);

    HttpServer::new(move || {
        let cors = Cors::permissive(); // Configure this properly for production

        let mut app = App::new()
            .wrap(cors)
            .wrap(actix_web::middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(recognizer.clone()))
            .service(handlers::health)
            .configure(handlers::inventory::configure)
            .configure(handlers::preferences::configure)
            .configure(handlers::recipes::configure)
            .configure(handlers::meal_plans::configure)
            .configure(handlers::shopping_lists::configure)
            .configure(handlers::scanner::configure);
        if let Some(queue) = &queue {
            app = app.app_data(web::Data::new(queue.clone()));
        }
        app
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
