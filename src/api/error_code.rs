//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::StudycurveError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 分析错误
/// - 4000-4099: 上传解析错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    InternalServerError = 1005,
    FileTooLarge = 1011,

    // 分析错误 3000-3099
    ValidationFailed = 3000,
    InvalidModel = 3001,
    EmptyDataset = 3002,

    // 上传解析错误 4000-4099
    InvalidMultipartData = 4002,
    FileReadError = 4003,
    CsvFileMissing = 4004,
    CsvParseError = 4005,
    MissingColumn = 4006,
}

impl From<&StudycurveError> for ErrorCode {
    fn from(err: &StudycurveError) -> Self {
        match err {
            StudycurveError::Validation(_) => ErrorCode::ValidationFailed,
            StudycurveError::MissingColumn(_) => ErrorCode::MissingColumn,
            StudycurveError::CsvParse(_) => ErrorCode::CsvParseError,
            StudycurveError::EmptyDataset(_) => ErrorCode::EmptyDataset,
            StudycurveError::InvalidModel(_) => ErrorCode::InvalidModel,
            StudycurveError::MultipartData(_) => ErrorCode::InvalidMultipartData,
            StudycurveError::FileTooLarge(_) => ErrorCode::FileTooLarge,
            StudycurveError::FileOperation(_) => ErrorCode::FileReadError,
            StudycurveError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}
