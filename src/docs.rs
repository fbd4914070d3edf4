use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::root,
        crate::handlers::health::health_check,
        crate::handlers::report::get_report,
        crate::handlers::report::list_reports,
        crate::handlers::report::create_report,
        crate::handlers::report::update_receive_status,
    ),
    components(
        schemas(
            crate::error::AppError,
            crate::models::ReportModel,
            crate::handlers::report::CreateReportRequest,
            crate::handlers::report::UpdateReceiveRequest,
            crate::handlers::report::ReportInfoResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "reports", description = "Report submission and receive tracking"),
    )
)]
pub struct ApiDoc;
