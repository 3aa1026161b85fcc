pub mod engine;
pub mod ownership;
pub mod product_service;
pub mod wishlist_item_service;
pub mod wishlist_service;
