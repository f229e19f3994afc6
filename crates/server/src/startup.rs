use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::logging::{init_logging_default, TracingLogger};
use service::users::repo::seaorm::SeaOrmUserRepository;
use service::users::UserService;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, users};

/// Initialize logging via the shared service facade
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Connect the database, preferring pool tuning from the config file.
async fn connect_db() -> anyhow::Result<DatabaseConnection> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => models::db::connect_with_config(&cfg.database).await,
        Err(_) => models::db::connect().await,
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection and schema
    let db = connect_db().await?;
    migration::Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmUserRepository::new(db));
    let users_service = Arc::new(UserService::new(repo, Arc::new(TracingLogger)));
    let state = users::ServerState { users: users_service };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting users api server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
