use crate::{
    error::{AppError, AppResult},
    models::{report, Report, ReportModel},
    utils::now_utc,
};
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr,
};

/// Fields supplied by the client when a report is created.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub address: String,
    pub password: String,
    pub name: String,
    pub date: NaiveDateTime,
}

/// Table access for `report`. Works on a pooled connection as well as on an
/// open transaction.
pub struct ReportStore<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ReportStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, new: NewReport) -> AppResult<ReportModel> {
        let model = report::ActiveModel {
            address: Set(new.address),
            password: Set(new.password),
            name: Set(new.name),
            date: Set(new.date),
            receive: Set(false),
            updated_at: Set(now_utc()),
            ..Default::default()
        };

        model.insert(self.conn).await.map_err(map_insert_err)
    }

    pub async fn find_by_id(&self, report_id: i32) -> AppResult<ReportModel> {
        Report::find_by_id(report_id)
            .one(self.conn)
            .await?
            .ok_or_else(AppError::report_not_found)
    }

    pub async fn find_all(&self) -> AppResult<Vec<ReportModel>> {
        Ok(Report::find().all(self.conn).await?)
    }

    pub async fn find_by_address_and_date(
        &self,
        address: &str,
        date: NaiveDateTime,
    ) -> AppResult<Option<ReportModel>> {
        let found = Report::find()
            .filter(report::Column::Address.eq(address))
            .filter(report::Column::Date.eq(date))
            .one(self.conn)
            .await?;
        Ok(found)
    }

    /// Persist pending changes and stamp `updated_at`.
    pub async fn update(&self, mut active: report::ActiveModel) -> AppResult<ReportModel> {
        active.updated_at = Set(now_utc());

        active.update(self.conn).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => AppError::report_not_found(),
            other => AppError::Database(other),
        })
    }

    /// Removing a row that is already gone is not an error.
    pub async fn delete(&self, report: ReportModel) -> AppResult<()> {
        let result = Report::delete_by_id(report.report_id)
            .exec(self.conn)
            .await?;
        if result.rows_affected == 0 {
            tracing::debug!("Report {} already deleted", report.report_id);
        }
        Ok(())
    }

    /// Received reports whose last mutation happened before `threshold`.
    pub async fn find_expired_received(
        &self,
        threshold: NaiveDateTime,
    ) -> AppResult<Vec<ReportModel>> {
        let expired = Report::find()
            .filter(report::Column::Receive.eq(true))
            .filter(report::Column::UpdatedAt.lt(threshold))
            .order_by_asc(report::Column::ReportId)
            .all(self.conn)
            .await?;
        Ok(expired)
    }
}

fn map_insert_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::report_exists(),
        _ => AppError::Database(err),
    }
}
