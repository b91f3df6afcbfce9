pub mod error;
pub mod health;
pub mod patients;

pub use error::AppError;
