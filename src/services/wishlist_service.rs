use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::NotSet, Condition, DatabaseConnection, DbErr, Set};
use serde_json::{Map, Value, json};

use crate::{
    dto::wishlists::WishlistDraft,
    entity::{
        Status,
        wishlists::{ActiveModel, Column, Entity as Wishlists, Model as WishlistModel},
    },
    error::{ErrorEntry, ServiceResult},
    middleware::auth::AuthUser,
    models::Wishlist,
    routes::params::ListQuery,
    services::{
        engine::{EntityService, Resource},
        ownership::{Owner, owns_wishlist},
    },
    state::AppState,
};

pub const NOT_OWNER: &str = "Cannot edit this entity!";

pub struct WishlistResource;

#[async_trait]
impl Resource for WishlistResource {
    type Entity = Wishlists;
    type Model = WishlistModel;
    type ActiveModel = ActiveModel;
    type Draft = WishlistDraft;
    type View = Wishlist;

    const NAME: &'static str = "wishlist";
    const NOT_FOUND: &'static str = "Wishlist not found";
    const DELETE_FAILED: &'static str = "Error during deleting wishlist";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &WishlistModel) -> i32 {
        model.id
    }

    fn visible_to(owner: &Owner) -> Condition {
        owns_wishlist(owner.user_id)
    }

    fn defaults(owner: &Owner) -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert("status".into(), json!(Status::Active.code()));
        defaults.insert("user_id".into(), json!(owner.user_id));
        defaults
    }

    fn pins(owner: &Owner) -> Map<String, Value> {
        let mut pins = Map::new();
        pins.insert("user_id".into(), json!(owner.user_id));
        pins
    }

    fn build(draft: WishlistDraft) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            user_id: Set(draft.user_id.unwrap_or_default()),
            name: Set(draft.name.unwrap_or_default()),
            creation_date: Set(draft
                .creation_date
                .unwrap_or_else(|| Utc::now().fixed_offset())),
            status: Set(draft
                .status
                .and_then(Status::from_code)
                .unwrap_or(Status::Active)),
        }
    }

    fn apply(draft: WishlistDraft, active: &mut ActiveModel) {
        if let Some(name) = draft.name {
            active.name.set_if_not_equals(name);
        }
        if let Some(status) = draft.status.and_then(Status::from_code) {
            active.status.set_if_not_equals(status);
        }
    }

    async fn admits(
        _db: &DatabaseConnection,
        owner: &Owner,
        draft: &WishlistDraft,
    ) -> Result<Option<ErrorEntry>, DbErr> {
        if draft.user_id != Some(owner.user_id) {
            return Ok(Some(ErrorEntry::relation(NOT_OWNER)));
        }
        Ok(None)
    }
}

fn service<'a>(state: &'a AppState, user: &AuthUser) -> EntityService<'a, WishlistResource> {
    EntityService::new(&state.orm, Owner::from(user))
}

pub async fn create_wishlist(
    state: &AppState,
    user: &AuthUser,
    body: Value,
) -> ServiceResult<Wishlist> {
    service(state, user).create(body).await
}

/// Only the caller's wishlists, whatever the filters say.
pub async fn list_wishlists(
    state: &AppState,
    user: &AuthUser,
    query: &ListQuery,
) -> ServiceResult<Vec<Wishlist>> {
    service(state, user).list(query).await
}

pub async fn get_wishlist(state: &AppState, user: &AuthUser, id: i32) -> ServiceResult<Wishlist> {
    service(state, user).get(id).await
}

pub async fn update_wishlist(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    body: Value,
) -> ServiceResult<Wishlist> {
    service(state, user).update(id, body).await
}

pub async fn delete_wishlist(state: &AppState, user: &AuthUser, id: i32) -> ServiceResult<()> {
    service(state, user).delete(id).await
}
