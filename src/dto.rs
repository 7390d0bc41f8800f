use utoipa::OpenApi;

pub mod todo;

pub use todo::*;

/// Schemas for request and response bodies shared across the API's OpenAPI documentation
#[derive(OpenApi)]
#[openapi(components(schemas(
    todo::Todo,
    todo::TodoPayload,
    crate::routing_utils::MessageResponse
)))]
pub struct OpenApiSchemas;
