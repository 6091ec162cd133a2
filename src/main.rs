use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use studytrack_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        // The original frontend is a mobile app talking cross-origin
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::score_attempt)
            .service(handlers::revision_set)
            .service(handlers::dashboard_overview)
            .service(handlers::dashboard_material)
            .service(handlers::dashboard_user)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
