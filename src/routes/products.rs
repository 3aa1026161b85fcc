use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::products::ProductDraft,
    error::ErrorStack,
    middleware::{
        auth::AuthUser,
        extract::{JsonBody, ListCriteria, RouteIds},
    },
    models::Product,
    response::RestResponse,
    routes::params::ListParams,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route(
            "/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/product",
    params(ListParams),
    responses(
        (status = 200, description = "Page of products", body = Vec<Product>),
        (status = 500, description = "Unknown filter or sort field", body = ErrorStack),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    ListCriteria(query): ListCriteria,
) -> RestResponse {
    RestResponse::settle(
        product_service::list_products(&state, &user, &query).await,
        StatusCode::OK,
    )
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 500, description = "Product not found", body = ErrorStack),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(id): RouteIds<i32>,
) -> RestResponse {
    RestResponse::settle(
        product_service::get_product(&state, &user, id).await,
        StatusCode::OK,
    )
}

#[utoipa::path(
    post,
    path = "/api/product",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Create product", body = Product),
        (status = 500, description = "Validation or persistence errors", body = ErrorStack),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(body): JsonBody,
) -> RestResponse {
    RestResponse::settle(
        product_service::create_product(&state, &user, body).await,
        StatusCode::CREATED,
    )
}

#[utoipa::path(
    put,
    path = "/api/product/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductDraft,
    responses(
        (status = 202, description = "Updated product", body = Product),
        (status = 500, description = "Validation, lookup or persistence errors", body = ErrorStack),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(id): RouteIds<i32>,
    JsonBody(body): JsonBody,
) -> RestResponse {
    RestResponse::settle(
        product_service::update_product(&state, &user, id, body).await,
        StatusCode::ACCEPTED,
    )
}

#[utoipa::path(
    delete,
    path = "/api/product/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Deleted product"),
        (status = 500, description = "Product missing or still referenced", body = ErrorStack),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    RouteIds(id): RouteIds<i32>,
) -> RestResponse {
    RestResponse::settle(
        product_service::delete_product(&state, &user, id).await,
        StatusCode::NO_CONTENT,
    )
}
