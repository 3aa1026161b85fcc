//! Extractors whose rejections use the same error list as the services.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{ErrorEntry, ErrorStack},
    response::RestResponse,
    routes::params::ListQuery,
};

fn rejected(message: String) -> RestResponse {
    tracing::debug!(reason = %message, "request rejected before reaching a service");
    RestResponse::from_errors(&ErrorStack::from(ErrorEntry::invalid(message)))
}

/// Any JSON document; the services decide what shape they accept.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = RestResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(body)) => Ok(JsonBody(body)),
            Err(rejection) => Err(rejected(rejection.body_text())),
        }
    }
}

/// Route ids, e.g. `RouteIds<i32>` or `RouteIds<(i32, i32)>`.
#[derive(Debug)]
pub struct RouteIds<T>(pub T);

impl<S, T> FromRequestParts<S> for RouteIds<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = RestResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(ids)) => Ok(RouteIds(ids)),
            Err(rejection) => Err(rejected(rejection.body_text())),
        }
    }
}

/// Collection criteria read from the query string.
#[derive(Debug)]
pub struct ListCriteria(pub ListQuery);

impl<S> FromRequestParts<S> for ListCriteria
where
    S: Send + Sync,
{
    type Rejection = RestResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => Ok(ListCriteria(ListQuery::from_pairs(pairs))),
            Err(rejection) => Err(rejected(rejection.body_text())),
        }
    }
}
