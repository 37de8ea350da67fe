mod app;
mod config;
mod error;

pub use app::run_native;
pub use config::Config;
pub use error::AppError;
