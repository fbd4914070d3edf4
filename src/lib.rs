pub mod config;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

pub use error::{AppError, AppResult};
pub use routes::create_app;
