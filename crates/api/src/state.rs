use std::sync::Arc;

use crate::config::ServerConfig;

/// Handler state: the Postgres pool and the immutable server config.
#[derive(Clone)]
pub struct AppState {
    pub pool: cityvetcare_db::DbPool,
    pub config: Arc<ServerConfig>,
}
