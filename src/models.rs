use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{products, wishlist_items, wishlists};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub ean: String,
    pub thumbnail: String,
    pub price: f64,
    pub creation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Wishlist {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// 1 = active, 0 = deleted.
    pub status: i32,
    pub creation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WishlistItem {
    pub id: i32,
    pub wishlist_id: i32,
    pub product_id: i32,
    pub desired_price: f64,
    pub quantity: i32,
    /// 1 = active, 0 = deleted.
    pub status: i32,
    pub creation_date: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            ean: model.ean,
            thumbnail: model.thumbnail,
            price: model.price,
            creation_date: model.creation_date.with_timezone(&Utc),
        }
    }
}

impl From<wishlists::Model> for Wishlist {
    fn from(model: wishlists::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            status: model.status.code(),
            creation_date: model.creation_date.with_timezone(&Utc),
        }
    }
}

impl From<wishlist_items::Model> for WishlistItem {
    fn from(model: wishlist_items::Model) -> Self {
        Self {
            id: model.id,
            wishlist_id: model.wishlist_id,
            product_id: model.product_id,
            desired_price: model.desired_price,
            quantity: model.quantity,
            status: model.status.code(),
            creation_date: model.creation_date.with_timezone(&Utc),
        }
    }
}
