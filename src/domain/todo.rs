use crate::domain::ValidationFailure;
use crate::domain::todo::driven_ports::TodoStore;
use crate::domain::todo::driving_ports::TodoError;
use async_trait::async_trait;
use derive_more::Display;
use validator::Validate;

/// Name the todo model goes by in validation messages
const MODEL_NAME: &str = "Todo";
/// Order in which todo fields are declared, which is the order validation issues are reported in
const FIELD_ORDER: [&str; 2] = ["title", "done"];

/// A persisted todo. The ID is assigned by the store and never changes.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub done: bool,
}

/// Todo fields as a client submitted them. Nothing is defaulted: a missing field
/// is a validation failure.
#[derive(Debug, Default, Validate)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoFields {
    #[validate(
        required(message = "Path `title` is required."),
        length(min = 1, message = "Path `title` is required.")
    )]
    pub title: Option<String>,
    #[validate(required(message = "Path `done` is required."))]
    pub done: Option<bool>,
}

impl TodoFields {
    /// Checks that every field is present, producing the content a todo can be stored with
    pub fn validated(self) -> Result<TodoContent, ValidationFailure> {
        self.validate()
            .map_err(|errs| ValidationFailure::from_errors(MODEL_NAME, &FIELD_ORDER, &errs))?;

        // Both fields are present once validation passes
        Ok(TodoContent {
            title: self.title.unwrap_or_default(),
            done: self.done.unwrap_or_default(),
        })
    }
}

/// Validated title and completion state, used both to create and to replace a todo
#[derive(PartialEq, Eq, Debug, Clone, Display)]
#[display("\"{title}\" (done: {done})")]
pub struct TodoContent {
    pub title: String,
    pub done: bool,
}

pub mod driven_ports {
    use super::*;

    /// A document collection holding todos. Lookups by ID report "no such todo" as `Ok(None)`;
    /// errors are reserved for failures like a malformed ID or an unreachable database.
    #[async_trait]
    pub trait TodoStore: Send + Sync {
        async fn create(&self, content: &TodoContent) -> Result<Todo, anyhow::Error>;
        async fn find_all(&self) -> Result<Vec<Todo>, anyhow::Error>;
        async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, anyhow::Error>;
        /// Replaces the todo's content, returning the todo as it is after the update
        async fn update_by_id(
            &self,
            id: &str,
            content: &TodoContent,
        ) -> Result<Option<Todo>, anyhow::Error>;
        /// Removes the todo, returning it as it was before removal
        async fn delete_by_id(&self, id: &str) -> Result<Option<Todo>, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("the requested todo does not exist")]
        NotFound,
        #[error(transparent)]
        Invalid(#[from] ValidationFailure),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }

    #[async_trait]
    pub trait TodoPort {
        async fn create_todo(
            &self,
            fields: TodoFields,
            store: &dyn TodoStore,
        ) -> Result<Todo, TodoError>;
        async fn all_todos(&self, store: &dyn TodoStore) -> Result<Vec<Todo>, TodoError>;
        async fn todo_by_id(&self, id: &str, store: &dyn TodoStore) -> Result<Todo, TodoError>;
        async fn update_todo(
            &self,
            id: &str,
            fields: TodoFields,
            store: &dyn TodoStore,
        ) -> Result<Todo, TodoError>;
        async fn delete_todo(&self, id: &str, store: &dyn TodoStore) -> Result<Todo, TodoError>;
    }
}

pub struct TodoService {}

#[async_trait]
impl driving_ports::TodoPort for TodoService {
    async fn create_todo(
        &self,
        fields: TodoFields,
        store: &dyn TodoStore,
    ) -> Result<Todo, TodoError> {
        let content = fields.validated()?;
        let created_todo = store.create(&content).await?;

        Ok(created_todo)
    }

    async fn all_todos(&self, store: &dyn TodoStore) -> Result<Vec<Todo>, TodoError> {
        let todos = store.find_all().await?;

        Ok(todos)
    }

    async fn todo_by_id(&self, id: &str, store: &dyn TodoStore) -> Result<Todo, TodoError> {
        store.find_by_id(id).await?.ok_or(TodoError::NotFound)
    }

    async fn update_todo(
        &self,
        id: &str,
        fields: TodoFields,
        store: &dyn TodoStore,
    ) -> Result<Todo, TodoError> {
        let content = fields.validated()?;

        store
            .update_by_id(id, &content)
            .await?
            .ok_or(TodoError::NotFound)
    }

    async fn delete_todo(&self, id: &str, store: &dyn TodoStore) -> Result<Todo, TodoError> {
        store.delete_by_id(id).await?.ok_or(TodoError::NotFound)
    }
}
