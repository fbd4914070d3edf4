pub mod report;
pub mod sweeper;
