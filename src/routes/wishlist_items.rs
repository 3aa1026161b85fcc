use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::wishlist_items::WishlistItemDraft,
    error::ErrorStack,
    middleware::{
        auth::AuthUser,
        extract::{JsonBody, ListCriteria, RouteIds},
    },
    models::WishlistItem,
    response::RestResponse,
    routes::params::ListParams,
    services::wishlist_item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlist/{id}/items", get(list_items).post(create_item))
        .route(
            "/wishlist/{id}/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/wishlist/{id}/items",
    params(
        ("id" = i32, Path, description = "Wishlist ID"),
        ListParams
    ),
    responses(
        (status = 200, description = "Items of the wishlist", body = Vec<WishlistItem>),
        (status = 500, description = "Wishlist not visible or bad criteria", body = ErrorStack),
    ),
    tag = "Wishlist items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(wishlist_id): RouteIds<i32>,
    ListCriteria(query): ListCriteria,
) -> RestResponse {
    RestResponse::settle(
        wishlist_item_service::list_items(&state, &user, wishlist_id, &query).await,
        StatusCode::OK,
    )
}

#[utoipa::path(
    get,
    path = "/api/wishlist/{id}/items/{item_id}",
    params(
        ("id" = i32, Path, description = "Wishlist ID"),
        ("item_id" = i32, Path, description = "Wishlist item ID")
    ),
    responses(
        (status = 200, description = "Get wishlist item", body = WishlistItem),
        (status = 500, description = "Item not in a wishlist of the caller", body = ErrorStack),
    ),
    tag = "Wishlist items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds((wishlist_id, item_id)): RouteIds<(i32, i32)>,
) -> RestResponse {
    RestResponse::settle(
        wishlist_item_service::get_item(&state, &user, wishlist_id, item_id).await,
        StatusCode::OK,
    )
}

#[utoipa::path(
    post,
    path = "/api/wishlist/{id}/items",
    params(
        ("id" = i32, Path, description = "Wishlist ID")
    ),
    request_body = WishlistItemDraft,
    responses(
        (status = 201, description = "Add item to wishlist", body = WishlistItem),
        (status = 500, description = "Validation, relation or persistence errors", body = ErrorStack),
    ),
    tag = "Wishlist items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(wishlist_id): RouteIds<i32>,
    JsonBody(body): JsonBody,
) -> RestResponse {
    RestResponse::settle(
        wishlist_item_service::create_item(&state, &user, wishlist_id, body).await,
        StatusCode::CREATED,
    )
}

#[utoipa::path(
    put,
    path = "/api/wishlist/{id}/items/{item_id}",
    params(
        ("id" = i32, Path, description = "Wishlist ID"),
        ("item_id" = i32, Path, description = "Wishlist item ID")
    ),
    request_body = WishlistItemDraft,
    responses(
        (status = 202, description = "Updated wishlist item", body = WishlistItem),
        (status = 500, description = "Validation, relation or persistence errors", body = ErrorStack),
    ),
    tag = "Wishlist items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds((wishlist_id, item_id)): RouteIds<(i32, i32)>,
    JsonBody(body): JsonBody,
) -> RestResponse {
    RestResponse::settle(
        wishlist_item_service::update_item(&state, &user, wishlist_id, item_id, body).await,
        StatusCode::ACCEPTED,
    )
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{id}/items/{item_id}",
    params(
        ("id" = i32, Path, description = "Wishlist ID"),
        ("item_id" = i32, Path, description = "Wishlist item ID")
    ),
    responses(
        (status = 204, description = "Deleted wishlist item"),
        (status = 500, description = "Item not in a wishlist of the caller", body = ErrorStack),
    ),
    tag = "Wishlist items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds((wishlist_id, item_id)): RouteIds<(i32, i32)>,
) -> RestResponse {
    RestResponse::settle(
        wishlist_item_service::delete_item(&state, &user, wishlist_id, item_id).await,
        StatusCode::NO_CONTENT,
    )
}
