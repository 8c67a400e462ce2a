use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "User API",
        version = "0.1.0",
        description = "User registration with welcome email notifications"
    ),
    modifiers(&UserPaths)
)]
pub struct ApiDoc;

/// Pulls in the user domain paths, which already carry the `/api` prefix.
struct UserPaths;

impl Modify for UserPaths {
    fn modify(&self, openapi: &mut OpenApiDocument) {
        openapi.merge(domain_users::handlers::ApiDoc::openapi());
    }
}
