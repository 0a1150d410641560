pub mod config;
pub mod result_code;

pub use result_code::ResultCode;
