//! 统一错误模型
//! 定义所有错误类型以及到进程退出码的映射

use thiserror::Error;

/// sysexits.h 约定的退出码
pub mod exit_code {
    /// 输入数据格式错误
    pub const DATA_ERR: u8 = 65;
    /// 远端服务不可用
    pub const UNAVAILABLE: u8 = 69;
    /// 输出写入失败
    pub const IO_ERR: u8 = 74;
    /// 配置错误
    pub const CONFIG: u8 = 78;
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    #[error("Invalid control center endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Control center returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON in control center response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// 获取进程退出码
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::MissingEnv(_) | AppError::InvalidEndpoint { .. } | AppError::Config(_) => {
                exit_code::CONFIG
            }
            AppError::Http(_) | AppError::Status { .. } => exit_code::UNAVAILABLE,
            AppError::Decode(_) => exit_code::DATA_ERR,
            AppError::Io(_) => exit_code::IO_ERR,
        }
    }

    /// 是否为配置类错误（用户需要修正环境变量或参数）
    pub fn is_config(&self) -> bool {
        self.exit_code() == exit_code::CONFIG
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 从 dotenv::Error 转换
impl From<dotenv::Error> for AppError {
    fn from(e: dotenv::Error) -> Self {
        AppError::Config(format!("failed to load env file: {}", e))
    }
}
