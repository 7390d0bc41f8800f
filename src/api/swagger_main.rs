use crate::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Todo API",
    description = "Create, list, fetch, replace, and delete todos"
))]
struct TodoServiceApi;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in the body schemas from [dto] and the paths from [todo][super::todo]
pub fn build_documentation() -> SwaggerUi {
    let mut api_docs = TodoServiceApi::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::todo::TodoApi::openapi());

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs)
}
