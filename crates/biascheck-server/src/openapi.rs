use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "biascheck API",
        version = "0.1.0",
        description = "Political-bias scoring of news articles via third-party LLM providers."
    ),
    paths(
        crate::routes::classify,
        crate::routes::analyze,
        crate::routes::clear_result,
        crate::routes::get_config,
        crate::routes::update_config,
        crate::routes::get_result,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::ClassifyRequest,
        crate::dto::AnalyzeRequest,
        crate::dto::ClearRequest,
        crate::dto::ClearResponse,
        crate::dto::StoredResult,
        crate::dto::ConfigResponse,
        crate::dto::UpdateConfigRequest,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "classify", description = "Article classification and latest result"),
        (name = "config", description = "Provider selection"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds Bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .description(Some(
                            "Optional. Enforced when BIASCHECK_SERVER_TOKEN is set.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
