pub mod error_code;
pub mod helpers;
pub mod services;

pub use error_code::ErrorCode;
