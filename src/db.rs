use anyhow::Context;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{error, info};

/// Database used when the connection string doesn't name one
pub const DEFAULT_DATABASE: &str = "todo-tdd";

/// Builds a MongoDB client for [url] and returns a handle to the database named in its path.
///
/// A malformed connection string is an error. An unreachable server is not: the failed ping is
/// logged and the handle is returned anyway, so the service can start before its database does.
/// Requests made while the server is down fail individually.
pub async fn connect_mongo(url: &str) -> Result<Database, anyhow::Error> {
    let options = ClientOptions::parse(url)
        .await
        .context("parsing the MongoDB connection string")?;
    let database_name = options
        .default_database
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());

    let client = Client::with_options(options).context("building the MongoDB client")?;
    let database = client.database(&database_name);

    match database.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => info!(database = %database_name, "Connected to MongoDB"),
        Err(ping_err) => error!(
            database = %database_name,
            "Error connecting to MongoDB: {ping_err}"
        ),
    }

    Ok(database)
}
