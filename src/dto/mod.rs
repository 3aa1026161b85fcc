pub mod auth;
pub mod products;
pub mod wishlist_items;
pub mod wishlists;
