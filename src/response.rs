use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorEntry, ErrorStack, ServiceResult};

/// One body and one status per request.
///
/// Handlers record the intended success status up front; a failed service
/// call replaces both with the error list and `500`.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    status: StatusCode,
    body: Option<Value>,
}

impl RestResponse {
    pub fn new(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn set_data_body<T: Serialize>(&mut self, data: &T, status: StatusCode) {
        match serde_json::to_value(data) {
            Ok(body) => {
                self.body = Some(body);
                self.status = status;
            }
            Err(err) => {
                tracing::error!(error = %err, "response body could not be encoded");
                self.set_errors(&ErrorStack::from(ErrorEntry::persistence(err)));
            }
        }
    }

    pub fn from_errors(errors: &ErrorStack) -> Self {
        let mut response = RestResponse::new(StatusCode::INTERNAL_SERVER_ERROR);
        response.set_errors(errors);
        response
    }

    pub fn set_errors(&mut self, errors: &ErrorStack) {
        self.body = serde_json::to_value(errors).ok();
        self.status = StatusCode::INTERNAL_SERVER_ERROR;
    }

    /// Renders a service outcome, `success` applying only when it succeeded.
    pub fn settle<T: Serialize>(outcome: ServiceResult<T>, success: StatusCode) -> Self {
        let mut response = RestResponse::new(success);
        match outcome {
            Ok(_) if success == StatusCode::NO_CONTENT => {}
            Ok(data) => response.set_data_body(&data, success),
            Err(errors) => response.set_errors(&errors),
        }
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl IntoResponse for RestResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) if self.status != StatusCode::NO_CONTENT => {
                (self.status, Json(body)).into_response()
            }
            _ => self.status.into_response(),
        }
    }
}
