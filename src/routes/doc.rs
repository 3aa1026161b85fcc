use utoipa::{
    Modify, OpenApi,
    openapi::{
        self, OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{products::ProductDraft, wishlist_items::WishlistItemDraft, wishlists::WishlistDraft},
    error::{ErrorEntry, ErrorStack},
    models::{Product, Wishlist, WishlistItem},
    routes::{health, products, wishlist_items, wishlists},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        wishlists::list_wishlists,
        wishlists::create_wishlist,
        wishlists::get_wishlist,
        wishlists::update_wishlist,
        wishlists::delete_wishlist,
        wishlist_items::list_items,
        wishlist_items::create_item,
        wishlist_items::get_item,
        wishlist_items::update_item,
        wishlist_items::delete_item
    ),
    components(
        schemas(
            health::HealthData,
            Product,
            Wishlist,
            WishlistItem,
            ProductDraft,
            WishlistDraft,
            WishlistItemDraft,
            ErrorEntry,
            ErrorStack
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalogue"),
        (name = "Wishlists", description = "Wishlists of the authenticated user"),
        (name = "Wishlist items", description = "Products placed on a wishlist"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
