use crate::{
    error::{AppError, AppResult},
    models::{report, ReportModel},
    store::{NewReport, ReportStore},
};
use sea_orm::{ActiveValue::Set, DatabaseConnection};

pub struct ReportService {
    db: DatabaseConnection,
}

impl ReportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn store(&self) -> ReportStore<'_, DatabaseConnection> {
        ReportStore::new(&self.db)
    }

    /// Create a report unless one already exists for the same address and
    /// date. New reports always start out not received.
    pub async fn create_report(&self, new: NewReport) -> AppResult<ReportModel> {
        let store = self.store();

        if store
            .find_by_address_and_date(&new.address, new.date)
            .await?
            .is_some()
        {
            return Err(AppError::report_exists());
        }

        let saved = store.insert(new).await?;
        tracing::info!(
            report_id = saved.report_id,
            address = %saved.address,
            "Report created"
        );
        Ok(saved)
    }

    pub async fn get_report(&self, report_id: i32) -> AppResult<ReportModel> {
        self.store().find_by_id(report_id).await
    }

    pub async fn list_reports(&self) -> AppResult<Vec<ReportModel>> {
        self.store().find_all().await
    }

    pub async fn update_receive_status(
        &self,
        report_id: i32,
        receive: bool,
    ) -> AppResult<ReportModel> {
        let store = self.store();
        let existing = store.find_by_id(report_id).await?;

        let mut active: report::ActiveModel = existing.into();
        active.receive = Set(receive);

        let updated = store.update(active).await?;
        tracing::info!(report_id, receive, "Report receive status updated");
        Ok(updated)
    }
}
