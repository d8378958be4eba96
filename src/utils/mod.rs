pub mod error;
pub mod report;

pub use error::{MrzError, Result};
pub use report::{check_result, ensure_ok, init_logging, TAG};
