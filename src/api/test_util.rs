use axum::body::{self, Bytes};
use serde::de::DeserializeOwned;

/// Reads every byte of a response body, failing the test if the body can't be read
pub async fn read_body(response_body: body::Body) -> Bytes {
    body::to_bytes(response_body, usize::MAX)
        .await
        .expect("Could not read data from response body!")
}

/// Used in tests to both extract the raw bytes from the HTTP response body and then deserialize them into the
/// requested type. Will panic and fail the test if either step fails somehow.
pub async fn deserialize_body<T: DeserializeOwned>(response_body: body::Body) -> T {
    let bytes = read_body(response_body).await;

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "Could not parse body content into data structure! Error: {}, Received body: {:?}",
            err, bytes
        )
    })
}
