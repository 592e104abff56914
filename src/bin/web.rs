//! Admin API server for the bracket engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! ADMIN_TOKEN guards admin routes; BRACKET_SEED fixes the shuffle.

use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use tournament_progression::config::ServerConfig;
use tournament_progression::web::{configure, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    if config.admin_token.is_none() {
        log::warn!("ADMIN_TOKEN not set; admin routes are open");
    }
    if let Some(seed) = config.bracket_seed {
        log::info!("Using fixed bracket seed {}", seed);
    }

    let state = Data::new(AppState::new(&config));
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
