use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::todo::driving_ports::TodoError;

/// Contains the description of a failed operation. Sent with every failure other than
/// a missing todo.
#[derive(Serialize, Debug, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq, Eq))]
pub struct MessageResponse {
    #[schema(example = "Todo validation failed: done: Path `done` is required.")]
    pub message: String,
}

/// Builds the 500 response every failed operation is reported with
fn operation_failure(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(MessageResponse { message }),
    )
        .into_response()
}

/// Response type that turns [TodoError]s into HTTP responses. A missing todo is a 404 with
/// an empty body; anything else is a 500 carrying the failure's description.
pub struct TodoErrorResponse(pub TodoError);

impl IntoResponse for TodoErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            TodoError::NotFound => StatusCode::NOT_FOUND.into_response(),
            TodoError::Invalid(failure) => operation_failure(failure.to_string()),
            // Context layers are for the logs, the client gets the underlying problem
            TodoError::PortError(err) => operation_failure(err.root_cause().to_string()),
        }
    }
}

impl From<TodoError> for TodoErrorResponse {
    fn from(value: TodoError) -> Self {
        Self(value)
    }
}

/// Wrapper for [axum::Json] which reports unreadable request bodies the same way as
/// any other failed operation
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Response type representing JSON parse errors
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        operation_failure(self.parse_problem)
    }
}
