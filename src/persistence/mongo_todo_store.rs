use crate::domain::todo::driven_ports::TodoStore;
use crate::domain::todo::{Todo, TodoContent};
use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

/// Collection todos are kept in
pub const TODO_COLLECTION: &str = "todos";

/// A todo as it is laid out in [TODO_COLLECTION]
#[derive(Debug, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    done: bool,
    #[serde(rename = "__v", default)]
    version: i32,
}

impl From<TodoDocument> for Todo {
    fn from(value: TodoDocument) -> Self {
        Todo {
            id: value.id.to_hex(),
            title: value.title,
            done: value.done,
        }
    }
}

/// [TodoStore] backed by a MongoDB collection
pub struct MongoTodoStore {
    todos: Collection<TodoDocument>,
}

impl MongoTodoStore {
    pub fn new(database: &Database) -> Self {
        MongoTodoStore {
            todos: database.collection(TODO_COLLECTION),
        }
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    async fn create(&self, content: &TodoContent) -> Result<Todo, anyhow::Error> {
        let document = TodoDocument {
            id: ObjectId::new(),
            title: content.title.clone(),
            done: content.done,
            version: 0,
        };

        self.todos
            .insert_one(&document, None)
            .await
            .with_context(|| format!("trying to insert todo {content} into the database"))?;

        Ok(Todo::from(document))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, anyhow::Error> {
        let documents: Vec<TodoDocument> = self
            .todos
            .find(doc! {}, None)
            .await
            .context("trying to query every todo")?
            .try_collect()
            .await
            .context("trying to read todos from the query cursor")?;

        Ok(documents.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, anyhow::Error> {
        let todo_id = super::cast_todo_id(id)?;

        let todo = self
            .todos
            .find_one(doc! { "_id": todo_id }, None)
            .await
            .context("trying to fetch a todo by ID")?
            .map(Todo::from);

        Ok(todo)
    }

    async fn update_by_id(
        &self,
        id: &str,
        content: &TodoContent,
    ) -> Result<Option<Todo>, anyhow::Error> {
        let todo_id = super::cast_todo_id(id)?;
        let return_updated = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let todo = self
            .todos
            .find_one_and_update(
                doc! { "_id": todo_id },
                doc! { "$set": { "title": content.title.as_str(), "done": content.done } },
                return_updated,
            )
            .await
            .context("trying to update a todo in the database")?
            .map(Todo::from);

        Ok(todo)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Todo>, anyhow::Error> {
        let todo_id = super::cast_todo_id(id)?;

        let todo = self
            .todos
            .find_one_and_delete(doc! { "_id": todo_id }, None)
            .await
            .context("trying to remove a todo from the database")?
            .map(Todo::from);

        Ok(todo)
    }
}
