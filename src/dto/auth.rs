use serde::{Deserialize, Serialize};

/// Claims carried by the bearer token; `sub` holds the user id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
