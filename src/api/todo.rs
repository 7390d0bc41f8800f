use crate::domain::todo::driven_ports::TodoStore;
use crate::domain::todo::driving_ports::{TodoError, TodoPort};
use crate::routing_utils::{self, Json, TodoErrorResponse};
use crate::{AppState, SharedData, domain, dto};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::get;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(create_todo, list_todos, get_todo, update_todo, delete_todo))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";
/// Route of a single todo, matched against the todo's ID
pub const TODO_ITEM_ROUTE: &str = "/todos/:todo_id";

/// Adds routes under "/todos" to the application router. The collection answers with or
/// without a trailing slash.
pub fn todo_routes() -> Router<Arc<SharedData>> {
    let collection_routes = get(|State(app_state): AppState| async move {
        let todo_service = domain::todo::TodoService {};

        list_todos(&todo_service, app_state.todo_store.as_ref()).await
    })
    .post(
        |State(app_state): AppState, Json(payload): Json<dto::TodoPayload>| async move {
            let todo_service = domain::todo::TodoService {};

            create_todo(payload, &todo_service, app_state.todo_store.as_ref()).await
        },
    );

    let item_routes = get(
        |State(app_state): AppState, Path(todo_id): Path<String>| async move {
            let todo_service = domain::todo::TodoService {};

            get_todo(&todo_id, &todo_service, app_state.todo_store.as_ref()).await
        },
    )
    .put(
        |State(app_state): AppState,
         Path(todo_id): Path<String>,
         Json(payload): Json<dto::TodoPayload>| async move {
            let todo_service = domain::todo::TodoService {};

            update_todo(&todo_id, payload, &todo_service, app_state.todo_store.as_ref()).await
        },
    )
    .delete(
        |State(app_state): AppState, Path(todo_id): Path<String>| async move {
            let todo_service = domain::todo::TodoService {};

            delete_todo(&todo_id, &todo_service, app_state.todo_store.as_ref()).await
        },
    );

    Router::new()
        .route("/todos", collection_routes.clone())
        .route("/todos/", collection_routes)
        .route(TODO_ITEM_ROUTE, item_routes)
}

/// Logs a failed operation on the todo store. A missing todo is an expected outcome,
/// so it isn't logged as an error.
fn log_todo_error(action: &str, err: &TodoError) {
    match err {
        TodoError::NotFound => info!("Could not {action}: the todo does not exist"),
        _ => error!("Failed to {action}: {err:#}"),
    }
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::TodoPayload,
    responses(
        (status = 201, description = "Todo was created", body = dto::Todo),
        (status = 500, description = "Todo was invalid or could not be stored", body = routing_utils::MessageResponse),
    ),
)]
/// Creates a todo
async fn create_todo(
    payload: dto::TodoPayload,
    todo_service: &impl TodoPort,
    todo_store: &dyn TodoStore,
) -> Result<(StatusCode, Json<dto::Todo>), ErrorResponse> {
    info!("Creating a todo");
    let created_todo = todo_service
        .create_todo(payload.into(), todo_store)
        .await
        .inspect_err(|err| log_todo_error("create todo", err))
        .map_err(TodoErrorResponse::from)?;

    Ok((StatusCode::CREATED, Json(dto::Todo::from(created_todo))))
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every stored todo", body = [dto::Todo]),
        (status = 500, description = "Todos could not be retrieved", body = routing_utils::MessageResponse),
    ),
)]
/// Retrieves every todo
async fn list_todos(
    todo_service: &impl TodoPort,
    todo_store: &dyn TodoStore,
) -> Result<Json<Vec<dto::Todo>>, ErrorResponse> {
    info!("Listing todos");
    let todos = todo_service
        .all_todos(todo_store)
        .await
        .inspect_err(|err| log_todo_error("list todos", err))
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(todos.into_iter().map(dto::Todo::from).collect()))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = String, Path, description = "ID of the todo")),
    responses(
        (status = 200, description = "The requested todo", body = dto::Todo),
        (status = 404, description = "No todo has this ID"),
        (status = 500, description = "ID was malformed or the todo could not be retrieved", body = routing_utils::MessageResponse),
    ),
)]
/// Retrieves a single todo
async fn get_todo(
    todo_id: &str,
    todo_service: &impl TodoPort,
    todo_store: &dyn TodoStore,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Getting todo {todo_id}");
    let todo = todo_service
        .todo_by_id(todo_id, todo_store)
        .await
        .inspect_err(|err| log_todo_error(&format!("get todo {todo_id}"), err))
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::Todo::from(todo)))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = String, Path, description = "ID of the todo")),
    request_body = dto::TodoPayload,
    responses(
        (status = 200, description = "The todo after the update", body = dto::Todo),
        (status = 404, description = "No todo has this ID"),
        (status = 500, description = "Update was invalid or could not be stored", body = routing_utils::MessageResponse),
    ),
)]
/// Replaces a todo's title and completion state
async fn update_todo(
    todo_id: &str,
    payload: dto::TodoPayload,
    todo_service: &impl TodoPort,
    todo_store: &dyn TodoStore,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Updating todo {todo_id}");
    let updated_todo = todo_service
        .update_todo(todo_id, payload.into(), todo_store)
        .await
        .inspect_err(|err| log_todo_error(&format!("update todo {todo_id}"), err))
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::Todo::from(updated_todo)))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = String, Path, description = "ID of the todo")),
    responses(
        (status = 200, description = "The todo that was deleted", body = dto::Todo),
        (status = 404, description = "No todo has this ID"),
        (status = 500, description = "ID was malformed or the todo could not be deleted", body = routing_utils::MessageResponse),
    ),
)]
/// Deletes a todo, responding with the todo as it was before deletion
async fn delete_todo(
    todo_id: &str,
    todo_service: &impl TodoPort,
    todo_store: &dyn TodoStore,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let deleted_todo = todo_service
        .delete_todo(todo_id, todo_store)
        .await
        .inspect_err(|err| log_todo_error(&format!("delete todo {todo_id}"), err))
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::Todo::from(deleted_todo)))
}
