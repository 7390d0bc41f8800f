use crate::domain::todo::driven_ports::TodoStore;
use crate::domain::todo::{Todo, TodoContent};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

/// [TodoStore] kept in process memory. Todos are listed in the order they were created.
/// IDs are generated and validated the same way the MongoDB store does it, so the API behaves
/// identically on either backend.
#[derive(Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn create(&self, content: &TodoContent) -> Result<Todo, anyhow::Error> {
        let todo = Todo {
            id: ObjectId::new().to_hex(),
            title: content.title.clone(),
            done: content.done,
        };
        self.todos.write().await.push(todo.clone());

        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, anyhow::Error> {
        Ok(self.todos.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, anyhow::Error> {
        let todo_id = super::cast_todo_id(id)?.to_hex();
        let todos = self.todos.read().await;

        Ok(todos.iter().find(|todo| todo.id == todo_id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        content: &TodoContent,
    ) -> Result<Option<Todo>, anyhow::Error> {
        let todo_id = super::cast_todo_id(id)?.to_hex();
        let mut todos = self.todos.write().await;

        let updated = todos.iter_mut().find(|todo| todo.id == todo_id).map(|todo| {
            todo.title = content.title.clone();
            todo.done = content.done;
            todo.clone()
        });

        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Todo>, anyhow::Error> {
        let todo_id = super::cast_todo_id(id)?.to_hex();
        let mut todos = self.todos.write().await;

        let deleted = todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .map(|position| todos.remove(position));

        Ok(deleted)
    }
}
