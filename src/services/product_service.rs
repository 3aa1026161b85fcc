use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::NotSet, Condition, Set};
use serde_json::Value;

use crate::{
    dto::products::ProductDraft,
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::ServiceResult,
    middleware::auth::AuthUser,
    models::Product,
    routes::params::ListQuery,
    services::{
        engine::{EntityService, Resource},
        ownership::Owner,
    },
    state::AppState,
};

/// Products are global; the caller only has to be authenticated.
pub struct ProductResource;

#[async_trait]
impl Resource for ProductResource {
    type Entity = Products;
    type Model = ProductModel;
    type ActiveModel = ActiveModel;
    type Draft = ProductDraft;
    type View = Product;

    const NAME: &'static str = "product";
    const NOT_FOUND: &'static str = "Product not found";
    const DELETE_FAILED: &'static str = "Error during deleting product";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &ProductModel) -> i32 {
        model.id
    }

    fn visible_to(_owner: &Owner) -> Condition {
        Condition::all()
    }

    fn build(draft: ProductDraft) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(draft.name.unwrap_or_default()),
            description: Set(draft.description.unwrap_or_default()),
            ean: Set(draft.ean.unwrap_or_default()),
            thumbnail: Set(draft.thumbnail.unwrap_or_default()),
            price: Set(draft.price.unwrap_or_default()),
            creation_date: Set(draft
                .creation_date
                .unwrap_or_else(|| Utc::now().fixed_offset())),
        }
    }

    fn apply(draft: ProductDraft, active: &mut ActiveModel) {
        if let Some(name) = draft.name {
            active.name.set_if_not_equals(name);
        }
        if let Some(description) = draft.description {
            active.description.set_if_not_equals(description);
        }
        if let Some(ean) = draft.ean {
            active.ean.set_if_not_equals(ean);
        }
        if let Some(thumbnail) = draft.thumbnail {
            active.thumbnail.set_if_not_equals(thumbnail);
        }
        if let Some(price) = draft.price {
            active.price.set_if_not_equals(price);
        }
    }
}

fn service<'a>(state: &'a AppState, user: &AuthUser) -> EntityService<'a, ProductResource> {
    EntityService::new(&state.orm, Owner::from(user))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    body: Value,
) -> ServiceResult<Product> {
    service(state, user).create(body).await
}

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    query: &ListQuery,
) -> ServiceResult<Vec<Product>> {
    service(state, user).list(query).await
}

pub async fn get_product(state: &AppState, user: &AuthUser, id: i32) -> ServiceResult<Product> {
    service(state, user).get(id).await
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    body: Value,
) -> ServiceResult<Product> {
    service(state, user).update(id, body).await
}

pub async fn delete_product(state: &AppState, user: &AuthUser, id: i32) -> ServiceResult<()> {
    service(state, user).delete(id).await
}
