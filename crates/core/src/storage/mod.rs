mod error;
mod http_mapping;
pub mod keys;
mod retry;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use retry::RetryPolicy;
pub use traits::PatientRepository;
