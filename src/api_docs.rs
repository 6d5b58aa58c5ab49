use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::lookup::models_by_brand,
        api::lookup::trims_by_model,
        // Add other endpoints here as we document them
    ),
    tags(
        (name = "autoparc", description = "Dealership inventory API")
    )
)]
pub struct ApiDoc;
