mod config;
mod handlers;
mod response;
mod store;
mod types;


use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};

use config::{AppState, ServerConfig, CORS_MAX_AGE_SECS};
use handlers::{get_rankings, health, reset, submit_score};
use response::json_config;
use store::LeaderboardStore;

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/score", web::post().to(submit_score))
        .route("/api/rank/{difficulty}", web::get().to(get_rankings))
        .route("/api/reset", web::delete().to(reset));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new(LeaderboardStore::new());

    tracing::info!(
        "starting swatter api: bind_addr={} frontend_url={} capacity={} json_limit={}",
        config.bind_addr,
        config.frontend_url,
        state.leaderboard.capacity(),
        config.json_limit
    );

    let frontend_url = config.frontend_url.clone();
    let json_limit = config.json_limit;
    let mut server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(CORS_MAX_AGE_SECS);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config(json_limit))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .keep_alive(std::time::Duration::from_secs(config.http_keep_alive_secs));

    if let Some(workers) = config.http_workers {
        server = server.workers(workers);
    }

    server.bind(&config.bind_addr)?.run().await
}
