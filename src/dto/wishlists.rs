use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    entity::Status,
    validation::{Checker, RuleGroup, Validate, Violation},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WishlistDraft {
    pub name: Option<String>,
    pub status: Option<i32>,
    /// Always set from the authenticated caller.
    #[schema(read_only)]
    pub user_id: Option<i32>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub creation_date: Option<DateTimeWithTimeZone>,
}

impl Validate for WishlistDraft {
    fn validate(&self, group: RuleGroup) -> Vec<Violation> {
        let mut check = Checker::new(group);
        check
            .field("name", self.name.as_deref())
            .required()
            .min_chars(2, "Wishlist name must be at least 2 characters long")
            .max_chars(255, "Wishlist name cannot be longer than 255 characters");
        check
            .field("status", self.status.as_ref())
            .required()
            .one_of(&Status::CODES, "Status of wishlist not allowed");
        check.field("user_id", self.user_id.as_ref()).required();
        check.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_rejected() {
        let draft = WishlistDraft {
            status: Some(3),
            ..Default::default()
        };
        let violations = draft.validate(RuleGroup::Update);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].property, "status");
        assert_eq!(violations[0].message, "Status of wishlist not allowed");
    }

    #[test]
    fn single_character_name_is_rejected_on_create() {
        let draft = WishlistDraft {
            name: Some("x".into()),
            status: Some(1),
            user_id: Some(4),
            creation_date: None,
        };
        let violations = draft.validate(RuleGroup::Create);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].property, "name");
    }
}
