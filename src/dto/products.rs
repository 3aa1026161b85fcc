use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::validation::{Checker, RuleGroup, Validate, Violation};

/// Product fields as they arrive in a create or update body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ean: Option<String>,
    pub thumbnail: Option<String>,
    pub price: Option<f64>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub creation_date: Option<DateTimeWithTimeZone>,
}

impl Validate for ProductDraft {
    fn validate(&self, group: RuleGroup) -> Vec<Violation> {
        let mut check = Checker::new(group);
        check
            .field("name", self.name.as_deref())
            .required()
            .min_chars(2, "Product name must be at least 2 characters long")
            .max_chars(255, "Product name cannot be longer than 255 characters");
        check
            .field("description", self.description.as_deref())
            .required()
            .min_chars(10, "Product description must be at least 10 characters long");
        check
            .field("ean", self.ean.as_deref())
            .required()
            .isbn13("This value is not a valid ISBN-13.");
        check
            .field("thumbnail", self.thumbnail.as_deref())
            .required()
            .url("The thumbnail is not a valid url");
        check
            .field("price", self.price.as_ref())
            .required()
            .positive("This value should be positive.");
        check.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mug() -> ProductDraft {
        ProductDraft {
            name: Some("Mug".into()),
            description: Some("A simple ceramic mug".into()),
            ean: Some("9781234567897".into()),
            thumbnail: Some("https://x/1.png".into()),
            price: Some(9.99),
            creation_date: None,
        }
    }

    #[test]
    fn complete_product_passes_create_rules() {
        assert!(mug().validate(RuleGroup::Create).is_empty());
    }

    #[test]
    fn empty_product_fails_every_required_field_on_create() {
        let violations = ProductDraft::default().validate(RuleGroup::Create);
        let properties: Vec<_> = violations.iter().map(|v| v.property.as_str()).collect();
        assert_eq!(properties, ["name", "description", "ean", "thumbnail", "price"]);
    }

    #[test]
    fn partial_update_only_checks_given_fields() {
        let draft = ProductDraft {
            name: Some("Big Mug".into()),
            ..Default::default()
        };
        assert!(draft.validate(RuleGroup::Update).is_empty());

        let draft = ProductDraft {
            ean: Some("1234".into()),
            price: Some(0.0),
            ..Default::default()
        };
        let violations = draft.validate(RuleGroup::Update);
        let properties: Vec<_> = violations.iter().map(|v| v.property.as_str()).collect();
        assert_eq!(properties, ["ean", "price"]);
    }
}
