use crate::app_env;
use crate::persistence::mongo_todo_store::MongoTodoStore;
use crate::{SharedData, build_router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use dotenv::dotenv;
use mongodb::{Client, Database};
use rand::{Rng, thread_rng};
use std::env;

/// A uniquely named database created for a single test
pub struct TestDatabase {
    database: Database,
}

impl TestDatabase {
    /// Connects to the server at the TEST_MONGODB_URL environment variable and picks a fresh
    /// database name on it. MongoDB creates the database on first write.
    pub async fn create() -> Self {
        if dotenv().is_err() {
            println!("Test is running without .env file.");
        }

        let base_url = env::var(app_env::test::TEST_MONGODB_URL).expect(
            "You must provide the TEST_MONGODB_URL environment variable as the base MongoDB connection string",
        );
        let client = Client::with_uri_str(&base_url)
            .await
            .unwrap_or_else(|err| panic!("Failed to build a MongoDB client: {err}"));
        let database_name = format!("test_db_{}", thread_rng().gen_range(10_000..99_999));

        TestDatabase {
            database: client.database(&database_name),
        }
    }

    /// Builds the full application router backed by this database
    pub fn router(&self) -> Router {
        build_router(SharedData {
            todo_store: Box::new(MongoTodoStore::new(&self.database)),
        })
    }

    /// Removes the database. Failures are reported but don't fail the test.
    pub async fn drop_database(self) {
        let database_name = self.database.name().to_owned();
        if let Err(drop_err) = self.database.drop(None).await {
            println!(
                "Failed to drop test database {database_name}, please remove it manually. Error: {drop_err}"
            );
        }
    }
}

/// Builds a request with a JSON body
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("could not build request")
}

/// Builds a request without a body
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("could not build request")
}
