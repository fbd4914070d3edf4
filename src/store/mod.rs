pub mod report;

pub use report::{NewReport, ReportStore};
