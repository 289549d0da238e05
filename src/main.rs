use actix_web::{App, HttpServer, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use zenshop_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers::{ApiServices, build_router},
    middlewares::create_cors,
    routing::{BoxedHandler, access_log, chain, request_id, serve},
    storage::{S3Storage, SharedStorage},
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let storage: SharedStorage =
        Arc::new(S3Storage::new(config.storage.clone()).expect("Failed to configure object storage"));

    // route table and chain are built once, then shared read-only by every worker
    let router = build_router(ApiServices::new(pool, storage), config.upload.max_bytes);
    log::info!("Registered {} routes", router.len());
    let entry: BoxedHandler = chain(Arc::new(router), &[&request_id, &access_log]);

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(create_cors())
            .app_data(web::Data::new(entry.clone()))
            .configure(swagger_config)
            .default_service(web::to(serve))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
