use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::wishlists::WishlistDraft,
    error::ErrorStack,
    middleware::{
        auth::AuthUser,
        extract::{JsonBody, ListCriteria, RouteIds},
    },
    models::Wishlist,
    response::RestResponse,
    routes::params::ListParams,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(list_wishlists).post(create_wishlist))
        .route(
            "/wishlist/{id}",
            get(get_wishlist).put(update_wishlist).delete(delete_wishlist),
        )
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    params(ListParams),
    responses(
        (status = 200, description = "Caller's wishlists", body = Vec<Wishlist>),
        (status = 500, description = "Unknown filter or sort field", body = ErrorStack),
    ),
    tag = "Wishlists"
)]
pub async fn list_wishlists(
    State(state): State<AppState>,
    user: AuthUser,
    ListCriteria(query): ListCriteria,
) -> RestResponse {
    RestResponse::settle(
        wishlist_service::list_wishlists(&state, &user, &query).await,
        StatusCode::OK,
    )
}

#[utoipa::path(
    get,
    path = "/api/wishlist/{id}",
    params(
        ("id" = i32, Path, description = "Wishlist ID")
    ),
    responses(
        (status = 200, description = "Get wishlist", body = Wishlist),
        (status = 500, description = "Missing or not owned by caller", body = ErrorStack),
    ),
    tag = "Wishlists"
)]
pub async fn get_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(id): RouteIds<i32>,
) -> RestResponse {
    RestResponse::settle(
        wishlist_service::get_wishlist(&state, &user, id).await,
        StatusCode::OK,
    )
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    request_body = WishlistDraft,
    responses(
        (status = 201, description = "Create wishlist for the caller", body = Wishlist),
        (status = 500, description = "Validation or persistence errors", body = ErrorStack),
    ),
    tag = "Wishlists"
)]
pub async fn create_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(body): JsonBody,
) -> RestResponse {
    RestResponse::settle(
        wishlist_service::create_wishlist(&state, &user, body).await,
        StatusCode::CREATED,
    )
}

#[utoipa::path(
    put,
    path = "/api/wishlist/{id}",
    params(
        ("id" = i32, Path, description = "Wishlist ID")
    ),
    request_body = WishlistDraft,
    responses(
        (status = 202, description = "Updated wishlist", body = Wishlist),
        (status = 500, description = "Validation, ownership or persistence errors", body = ErrorStack),
    ),
    tag = "Wishlists"
)]
pub async fn update_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(id): RouteIds<i32>,
    JsonBody(body): JsonBody,
) -> RestResponse {
    RestResponse::settle(
        wishlist_service::update_wishlist(&state, &user, id, body).await,
        StatusCode::ACCEPTED,
    )
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{id}",
    params(
        ("id" = i32, Path, description = "Wishlist ID")
    ),
    responses(
        (status = 204, description = "Deleted wishlist and its items"),
        (status = 500, description = "Missing or not owned by caller", body = ErrorStack),
    ),
    tag = "Wishlists"
)]
pub async fn delete_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(id): RouteIds<i32>,
) -> RestResponse {
    RestResponse::settle(
        wishlist_service::delete_wishlist(&state, &user, id).await,
        StatusCode::NO_CONTENT,
    )
}
