use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Report {
    Table,
    #[sea_orm(iden = "reportId")]
    ReportId,
    Address,
    Password,
    Name,
    Date,
    Receive,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Report::ReportId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Bounded so MySQL can index it; the other text columns are not.
                    .col(ColumnDef::new(Report::Address).string_len(255).not_null())
                    .col(ColumnDef::new(Report::Password).text().not_null())
                    .col(ColumnDef::new(Report::Name).text().not_null())
                    .col(datetime_col(backend, Report::Date).not_null())
                    .col(
                        ColumnDef::new(Report::Receive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(datetime_col(backend, Report::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_address")
                    .table(Report::Table)
                    .col(Report::Address)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_address_date_unique")
                    .table(Report::Table)
                    .col(Report::Address)
                    .col(Report::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Sweeper lookup: receive = true AND updated_at < threshold
        manager
            .create_index(
                Index::create()
                    .name("idx_report_receive_updated_at")
                    .table(Report::Table)
                    .col(Report::Receive)
                    .col(Report::UpdatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await
    }
}

/// Microsecond timestamp column. MySQL's plain `DATETIME` drops fractional
/// seconds, so it gets an explicit precision.
fn datetime_col(backend: DatabaseBackend, col: Report) -> ColumnDef {
    let mut def = ColumnDef::new(col);
    match backend {
        DatabaseBackend::MySql => def.custom(Alias::new("DATETIME(6)")),
        _ => def.date_time(),
    };
    def
}
