use config::Config;
use sqlx::PgPool;

pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod translation;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    /// 所有外部调用共用一个连接池
    pub http: reqwest::Client,
}
