use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    entity::Status,
    validation::{Checker, RuleGroup, Validate, Violation},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WishlistItemDraft {
    pub product_id: Option<i32>,
    /// Always taken from the route.
    #[schema(read_only)]
    pub wishlist_id: Option<i32>,
    pub desired_price: Option<f64>,
    pub quantity: Option<i32>,
    pub status: Option<i32>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub creation_date: Option<DateTimeWithTimeZone>,
}

impl Validate for WishlistItemDraft {
    fn validate(&self, group: RuleGroup) -> Vec<Violation> {
        let mut check = Checker::new(group);
        check.field("product_id", self.product_id.as_ref()).required();
        check.field("wishlist_id", self.wishlist_id.as_ref()).required();
        check
            .field("desired_price", self.desired_price.as_ref())
            .required()
            .positive("Desired price must be greater than zero");
        check
            .field("quantity", self.quantity.as_ref())
            .required()
            .positive("Quantity must be a positive number");
        check
            .field("status", self.status.as_ref())
            .required()
            .one_of(&Status::CODES, "Status of wishlist item not allowed");
        check.finish()
    }
}
