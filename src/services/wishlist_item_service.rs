use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use serde_json::{Map, Value, json};

use crate::{
    dto::wishlist_items::WishlistItemDraft,
    entity::{
        Products, Status, Wishlists,
        wishlist_items::{ActiveModel, Column, Entity as WishlistItems, Model as WishlistItemModel},
        wishlists,
    },
    error::{ErrorEntry, ServiceResult},
    middleware::auth::AuthUser,
    models::WishlistItem,
    routes::params::ListQuery,
    services::{
        engine::{EntityService, Resource},
        ownership::{Owner, owned_wishlist_ids, owns_wishlist},
    },
    state::AppState,
};

pub const FOREIGN_WISHLIST: &str = "Wishlist not exists or is not of current user";
pub const MISSING_PRODUCT: &str = "Product not exists";

/// Items are reachable only through a wishlist owned by the caller.
pub struct WishlistItemResource;

#[async_trait]
impl Resource for WishlistItemResource {
    type Entity = WishlistItems;
    type Model = WishlistItemModel;
    type ActiveModel = ActiveModel;
    type Draft = WishlistItemDraft;
    type View = WishlistItem;

    const NAME: &'static str = "wishlist_item";
    const NOT_FOUND: &'static str = "Wishlist item is not belong your wishlist";
    const DELETE_FAILED: &'static str = "Deleting wishlist item error";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &WishlistItemModel) -> i32 {
        model.id
    }

    fn visible_to(owner: &Owner) -> Condition {
        Condition::all()
            .add(Column::WishlistId.in_subquery(owned_wishlist_ids(owner.user_id)))
            .add_option(owner.parent.map(|wishlist_id| Column::WishlistId.eq(wishlist_id)))
    }

    fn defaults(owner: &Owner) -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert("status".into(), json!(Status::Active.code()));
        if let Some(wishlist_id) = owner.parent {
            defaults.insert("wishlist_id".into(), json!(wishlist_id));
        }
        defaults
    }

    fn pins(owner: &Owner) -> Map<String, Value> {
        let mut pins = Map::new();
        if let Some(wishlist_id) = owner.parent {
            pins.insert("wishlist_id".into(), json!(wishlist_id));
        }
        pins
    }

    fn build(draft: WishlistItemDraft) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            wishlist_id: Set(draft.wishlist_id.unwrap_or_default()),
            product_id: Set(draft.product_id.unwrap_or_default()),
            creation_date: Set(draft
                .creation_date
                .unwrap_or_else(|| Utc::now().fixed_offset())),
            status: Set(draft
                .status
                .and_then(Status::from_code)
                .unwrap_or(Status::Active)),
            desired_price: Set(draft.desired_price.unwrap_or_default()),
            quantity: Set(draft.quantity.unwrap_or_default()),
        }
    }

    fn apply(draft: WishlistItemDraft, active: &mut ActiveModel) {
        if let Some(product_id) = draft.product_id {
            active.product_id.set_if_not_equals(product_id);
        }
        if let Some(desired_price) = draft.desired_price {
            active.desired_price.set_if_not_equals(desired_price);
        }
        if let Some(quantity) = draft.quantity {
            active.quantity.set_if_not_equals(quantity);
        }
        if let Some(status) = draft.status.and_then(Status::from_code) {
            active.status.set_if_not_equals(status);
        }
    }

    async fn admits(
        db: &DatabaseConnection,
        owner: &Owner,
        draft: &WishlistItemDraft,
    ) -> Result<Option<ErrorEntry>, DbErr> {
        let visible = match draft.wishlist_id {
            Some(wishlist_id) => wishlist_visible(db, owner.user_id, wishlist_id).await?,
            None => false,
        };
        if !visible {
            return Ok(Some(ErrorEntry::relation(FOREIGN_WISHLIST)));
        }
        if let Some(product_id) = draft.product_id {
            if Products::find_by_id(product_id).one(db).await?.is_none() {
                return Ok(Some(ErrorEntry::relation(MISSING_PRODUCT)));
            }
        }
        Ok(None)
    }
}

async fn wishlist_visible(
    db: &DatabaseConnection,
    user_id: i32,
    wishlist_id: i32,
) -> Result<bool, DbErr> {
    let count = Wishlists::find()
        .filter(owns_wishlist(user_id))
        .filter(wishlists::Column::Id.eq(wishlist_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

fn service<'a>(
    state: &'a AppState,
    user: &AuthUser,
    wishlist_id: i32,
) -> EntityService<'a, WishlistItemResource> {
    EntityService::new(&state.orm, Owner::from(user).within(wishlist_id))
}

pub async fn create_item(
    state: &AppState,
    user: &AuthUser,
    wishlist_id: i32,
    body: Value,
) -> ServiceResult<WishlistItem> {
    service(state, user, wishlist_id).create(body).await
}

/// Refuses up front when the wishlist is missing or foreign, instead of
/// answering with an empty page.
pub async fn list_items(
    state: &AppState,
    user: &AuthUser,
    wishlist_id: i32,
    query: &ListQuery,
) -> ServiceResult<Vec<WishlistItem>> {
    let visible = wishlist_visible(&state.orm, user.user_id, wishlist_id)
        .await
        .map_err(|err| {
            tracing::warn!(wishlist_id, error = %err, "wishlist lookup failed");
            ErrorEntry::persistence(err)
        })?;
    if !visible {
        tracing::debug!(wishlist_id, user_id = user.user_id, "wishlist not visible");
        return Err(ErrorEntry::relation(FOREIGN_WISHLIST).into());
    }
    service(state, user, wishlist_id).list(query).await
}

pub async fn get_item(
    state: &AppState,
    user: &AuthUser,
    wishlist_id: i32,
    item_id: i32,
) -> ServiceResult<WishlistItem> {
    service(state, user, wishlist_id).get(item_id).await
}

pub async fn update_item(
    state: &AppState,
    user: &AuthUser,
    wishlist_id: i32,
    item_id: i32,
    body: Value,
) -> ServiceResult<WishlistItem> {
    service(state, user, wishlist_id).update(item_id, body).await
}

pub async fn delete_item(
    state: &AppState,
    user: &AuthUser,
    wishlist_id: i32,
    item_id: i32,
) -> ServiceResult<()> {
    service(state, user, wishlist_id).delete(item_id).await
}
