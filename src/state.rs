use std::sync::Arc;

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    /// HS256 secret shared with the token issuer.
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            orm,
            jwt_secret: jwt_secret.into(),
        }
    }
}
