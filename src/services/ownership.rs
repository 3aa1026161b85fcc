//! Visibility predicates shared by the owned resources.

use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Query, SelectStatement},
};

use crate::{entity::wishlists, middleware::auth::AuthUser};

/// Who a lifecycle call acts for, and the parent id taken from the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub user_id: i32,
    pub parent: Option<i32>,
}

impl Owner {
    pub fn user(user_id: i32) -> Self {
        Self {
            user_id,
            parent: None,
        }
    }

    pub fn within(self, parent: i32) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }
}

impl From<&AuthUser> for Owner {
    fn from(user: &AuthUser) -> Self {
        Owner::user(user.user_id)
    }
}

/// Wishlists belonging to the caller.
pub fn owns_wishlist(user_id: i32) -> Condition {
    Condition::all().add(wishlists::Column::UserId.eq(user_id))
}

/// `SELECT wishlists.id` restricted by [`owns_wishlist`], for `IN` filters on
/// rows that hang off a wishlist.
pub fn owned_wishlist_ids(user_id: i32) -> SelectStatement {
    Query::select()
        .column((wishlists::Entity, wishlists::Column::Id))
        .from(wishlists::Entity)
        .cond_where(owns_wishlist(user_id))
        .to_owned()
}
