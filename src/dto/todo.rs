use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// DTO for the fields of a todo sent to create or replace it. Both fields are required, but
/// they're optional here so a missing field is reported by validation instead of as
/// unreadable JSON. Unknown fields are ignored.
#[derive(Debug, Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct TodoPayload {
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    #[schema(example = false)]
    pub done: Option<bool>,
}

impl From<TodoPayload> for domain::todo::TodoFields {
    fn from(value: TodoPayload) -> Self {
        domain::todo::TodoFields {
            title: value.title,
            done: value.done,
        }
    }
}

/// DTO for a todo returned on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct Todo {
    #[serde(rename = "_id")]
    #[schema(example = "66a2d26c2da7142ed426c1b2")]
    pub id: String,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = false)]
    pub done: bool,
}

impl From<domain::todo::Todo> for Todo {
    fn from(value: domain::todo::Todo) -> Self {
        Todo {
            id: value.id,
            title: value.title,
            done: value.done,
        }
    }
}
