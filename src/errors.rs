use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum StudycurveError {
    Validation(String),
    MissingColumn(String),
    CsvParse(String),
    EmptyDataset(String),
    InvalidModel(String),
    MultipartData(String),
    FileTooLarge(String),
    FileOperation(String),
    Serialization(String),
}

impl StudycurveError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            StudycurveError::Validation(_) => "E001",
            StudycurveError::MissingColumn(_) => "E002",
            StudycurveError::CsvParse(_) => "E003",
            StudycurveError::EmptyDataset(_) => "E004",
            StudycurveError::InvalidModel(_) => "E005",
            StudycurveError::MultipartData(_) => "E006",
            StudycurveError::FileTooLarge(_) => "E007",
            StudycurveError::FileOperation(_) => "E008",
            StudycurveError::Serialization(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            StudycurveError::Validation(_) => "Validation Error",
            StudycurveError::MissingColumn(_) => "Missing Column",
            StudycurveError::CsvParse(_) => "CSV Parse Error",
            StudycurveError::EmptyDataset(_) => "Empty Dataset",
            StudycurveError::InvalidModel(_) => "Invalid Model",
            StudycurveError::MultipartData(_) => "Invalid Multipart Data",
            StudycurveError::FileTooLarge(_) => "File Too Large",
            StudycurveError::FileOperation(_) => "File Operation Error",
            StudycurveError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            StudycurveError::Validation(msg) => msg,
            StudycurveError::MissingColumn(msg) => msg,
            StudycurveError::CsvParse(msg) => msg,
            StudycurveError::EmptyDataset(msg) => msg,
            StudycurveError::InvalidModel(msg) => msg,
            StudycurveError::MultipartData(msg) => msg,
            StudycurveError::FileTooLarge(msg) => msg,
            StudycurveError::FileOperation(msg) => msg,
            StudycurveError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            StudycurveError::Validation(_)
            | StudycurveError::MissingColumn(_)
            | StudycurveError::CsvParse(_)
            | StudycurveError::EmptyDataset(_)
            | StudycurveError::InvalidModel(_)
            | StudycurveError::MultipartData(_) => StatusCode::BAD_REQUEST,
            StudycurveError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            StudycurveError::FileOperation(_) | StudycurveError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for StudycurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for StudycurveError {}

// 便捷的构造函数
impl StudycurveError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        StudycurveError::Validation(msg.into())
    }

    pub fn missing_column<T: Into<String>>(msg: T) -> Self {
        StudycurveError::MissingColumn(msg.into())
    }

    pub fn csv_parse<T: Into<String>>(msg: T) -> Self {
        StudycurveError::CsvParse(msg.into())
    }

    pub fn empty_dataset<T: Into<String>>(msg: T) -> Self {
        StudycurveError::EmptyDataset(msg.into())
    }

    pub fn invalid_model<T: Into<String>>(msg: T) -> Self {
        StudycurveError::InvalidModel(msg.into())
    }

    pub fn multipart_data<T: Into<String>>(msg: T) -> Self {
        StudycurveError::MultipartData(msg.into())
    }

    pub fn file_too_large<T: Into<String>>(msg: T) -> Self {
        StudycurveError::FileTooLarge(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        StudycurveError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        StudycurveError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for StudycurveError {
    fn from(err: std::io::Error) -> Self {
        StudycurveError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for StudycurveError {
    fn from(err: csv::Error) -> Self {
        StudycurveError::CsvParse(err.to_string())
    }
}

impl From<serde_json::Error> for StudycurveError {
    fn from(err: serde_json::Error) -> Self {
        StudycurveError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudycurveError>;
