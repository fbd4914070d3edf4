use crate::docs::ApiDoc;
use crate::handlers;
use axum::{extract::Extension, http::HeaderValue, routing, Router};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_routes() -> Router {
    Router::new()
        .route(
            "/reportInfo/{reportId}",
            routing::get(handlers::report::get_report),
        )
        .route("/reports", routing::get(handlers::report::list_reports))
        .route(
            "/reports/{reportId}",
            routing::patch(handlers::report::update_receive_status),
        )
        .route("/reporting", routing::post(handlers::report::create_report))
}

/// Single allowed origin, credentials on. Methods and headers are mirrored
/// from the request since wildcards cannot be combined with credentials.
pub fn build_cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn create_app(db: DatabaseConnection, cors_origin: HeaderValue) -> Router {
    Router::new()
        .route("/", routing::get(handlers::health::root))
        .route("/health", routing::get(handlers::health::health_check))
        .merge(create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(cors_origin))
                .layer(Extension(db)),
        )
}
