use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::models::ReportModel;
use crate::services::report::ReportService;
use crate::store::NewReport;
use crate::utils::time::deserialize_timestamp;
use axum::{response::IntoResponse, Extension, Json};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    /// Reporting location or device address
    pub address: String,
    /// Credential attached to the report, stored as given
    pub password: String,
    /// Human readable label
    pub name: String,
    /// When the report pertains to (ISO-8601)
    #[serde(deserialize_with = "deserialize_timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T00:00:00")]
    pub date: NaiveDateTime,
}

impl From<CreateReportRequest> for NewReport {
    fn from(req: CreateReportRequest) -> Self {
        Self {
            address: req.address,
            password: req.password,
            name: req.name,
            date: req.date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReceiveRequest {
    /// New receive flag
    pub receive: bool,
}

/// Report as returned by the read endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportInfoResponse {
    pub password: String,
    pub address: String,
    pub receive: bool,
    #[serde(rename = "reportId")]
    pub report_id: i32,
    pub name: String,
    pub date: NaiveDateTime,
}

impl From<ReportModel> for ReportInfoResponse {
    fn from(r: ReportModel) -> Self {
        Self {
            password: r.password,
            address: r.address,
            receive: r.receive,
            report_id: r.report_id,
            name: r.name,
            date: r.date,
        }
    }
}

/// Ids are accepted as any integer; one that cannot be a stored id simply
/// does not exist.
fn to_report_id(raw: i64) -> AppResult<i32> {
    i32::try_from(raw).map_err(|_| AppError::report_not_found())
}

#[utoipa::path(
    get,
    path = "/reportInfo/{reportId}",
    params(("reportId" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report found", body = ReportInfoResponse),
        (status = 404, description = "Report not found", body = AppError),
    ),
    tag = "reports"
)]
pub async fn get_report(
    Extension(db): Extension<DatabaseConnection>,
    AppPath(report_id): AppPath<i64>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(db);
    let report = service.get_report(to_report_id(report_id)?).await?;

    Ok(Json(ReportInfoResponse::from(report)))
}

#[utoipa::path(
    get,
    path = "/reports",
    responses(
        (status = 200, description = "All reports", body = Vec<ReportInfoResponse>),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(db);
    let reports = service.list_reports().await?;
    let items: Vec<ReportInfoResponse> = reports.into_iter().map(Into::into).collect();

    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/reporting",
    request_body = CreateReportRequest,
    responses(
        (status = 200, description = "Report created", body = ReportModel),
        (status = 400, description = "Report already exists", body = AppError),
        (status = 422, description = "Malformed body", body = AppError),
    ),
    tag = "reports"
)]
pub async fn create_report(
    Extension(db): Extension<DatabaseConnection>,
    AppJson(payload): AppJson<CreateReportRequest>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(db);
    let report = service.create_report(payload.into()).await?;

    Ok(Json(report))
}

#[utoipa::path(
    patch,
    path = "/reports/{reportId}",
    params(("reportId" = i64, Path, description = "Report ID")),
    request_body = UpdateReceiveRequest,
    responses(
        (status = 200, description = "Receive status updated", body = ReportModel),
        (status = 404, description = "Report not found", body = AppError),
    ),
    tag = "reports"
)]
pub async fn update_receive_status(
    Extension(db): Extension<DatabaseConnection>,
    AppPath(report_id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateReceiveRequest>,
) -> AppResult<impl IntoResponse> {
    let service = ReportService::new(db);
    let report = service
        .update_receive_status(to_report_id(report_id)?, payload.receive)
        .await?;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_id_in_range_passes_through() {
        assert_eq!(to_report_id(1).unwrap(), 1);
        assert_eq!(to_report_id(i32::MAX as i64).unwrap(), i32::MAX);
    }

    #[test]
    fn report_id_out_of_range_is_not_found() {
        let err = to_report_id(99_999_999_999).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            to_report_id(i64::MIN).unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
