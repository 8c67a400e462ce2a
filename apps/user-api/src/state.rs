use database::postgres::DatabaseConnection;

/// Connections shared by the readiness probe and shutdown cleanup
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub nats: async_nats::Client,
}
