#![allow(dead_code)]

use axum::http::HeaderValue;
use reqwest::Client;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter,
};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;

pub const TEST_ORIGIN: &str = "http://192.168.0.3:3000";

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every query on the same in-memory database.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory database");

    reportbox::migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn spawn_app() -> TestApp {
    let db = test_db().await;
    let app = reportbox::create_app(db.clone(), HeaderValue::from_static(TEST_ORIGIN));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
    }
}

/// Submit a report and return the response body.
pub async fn create_report(app: &TestApp, address: &str, date: &str) -> Value {
    let resp = app
        .client
        .post(app.url("/reporting"))
        .json(&serde_json::json!({
            "address": address,
            "password": "p",
            "name": "n",
            "date": date
        }))
        .send()
        .await
        .expect("Failed to create report");

    let status = resp.status();
    let body: Value = resp.json().await.expect("Failed to parse response");
    if status != 200 {
        panic!("Failed to create report: status={}, body={}", status, body);
    }
    body
}

/// Push `updated_at` of a report into the past, as if it had been left
/// untouched for `secs` seconds.
pub async fn age_report(db: &DatabaseConnection, report_id: i32, secs: i64) {
    use reportbox::models::{report, Report};

    let past = reportbox::utils::now_utc() - chrono::Duration::seconds(secs);
    Report::update_many()
        .col_expr(report::Column::UpdatedAt, Expr::value(past))
        .filter(report::Column::ReportId.eq(report_id))
        .exec(db)
        .await
        .expect("Failed to age report");
}
