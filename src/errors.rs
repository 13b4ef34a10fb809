use thiserror::Error;

/// 统一错误类型，传输层相关的变体见 [`StockDeskError::is_transport`]
#[derive(Error, Debug)]
pub enum StockDeskError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Format error: {0}")]
    FormatError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, StockDeskError>;

// 用于从字符串创建错误
impl From<String> for StockDeskError {
    fn from(s: String) -> Self {
        StockDeskError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for StockDeskError {
    fn from(s: &str) -> Self {
        StockDeskError::Unknown(s.to_string())
    }
}

impl StockDeskError {
    /// 是否属于连接层面的失败（请求未完成或响应体无法解析）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StockDeskError::RequestError(_)
                | StockDeskError::TransportError(_)
                | StockDeskError::JsonError(_)
                | StockDeskError::IoError(_)
        )
    }
}
