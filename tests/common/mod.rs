#![allow(dead_code)]

use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::{Value, json};
use wishlist_api::{
    db::{create_orm_conn, run_migrations},
    dto::auth::Claims,
    entity::users::ActiveModel as UserActive,
    middleware::auth::AuthUser,
    state::AppState,
};

pub const SECRET: &str = "integration-secret";

/// Fresh in-memory database with the schema applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, SECRET))
}

pub async fn create_user(state: &AppState, email: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: NotSet,
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        active: Set(true),
    }
    .insert(&state.orm)
    .await?;
    Ok(AuthUser { user_id: user.id })
}

pub fn token_for(user: &AuthUser) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )?)
}

pub fn product_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "A sturdy product for testing",
        "ean": "9781234567897",
        "thumbnail": "https://example.com/thumb.png",
        "price": 19.99
    })
}
