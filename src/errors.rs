use std::fmt;

#[derive(Debug, Clone)]
pub enum AppError {
    InvalidUrl(String),
    Validation(String),
    HttpClient(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
    TaskJoin(String),
}

impl AppError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(_) => "E001",
            AppError::Validation(_) => "E002",
            AppError::HttpClient(_) => "E003",
            AppError::FileOperation(_) => "E004",
            AppError::Serialization(_) => "E005",
            AppError::Config(_) => "E006",
            AppError::TaskJoin(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(_) => "Invalid URL",
            AppError::Validation(_) => "Validation Error",
            AppError::HttpClient(_) => "HTTP Client Error",
            AppError::FileOperation(_) => "File Operation Error",
            AppError::Serialization(_) => "Serialization Error",
            AppError::Config(_) => "Configuration Error",
            AppError::TaskJoin(_) => "Background Task Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            AppError::InvalidUrl(msg) => msg,
            AppError::Validation(msg) => msg,
            AppError::HttpClient(msg) => msg,
            AppError::FileOperation(msg) => msg,
            AppError::Serialization(msg) => msg,
            AppError::Config(msg) => msg,
            AppError::TaskJoin(msg) => msg,
        }
    }

    /// 是否属于调用方输入错误（HTTP 层映射为 400）
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidUrl(_) | AppError::Validation(_))
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AppError {}

// 便捷的构造函数
impl AppError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        AppError::InvalidUrl(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn http_client<T: Into<String>>(msg: T) -> Self {
        AppError::HttpClient(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AppError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AppError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        AppError::Config(msg.into())
    }

    pub fn task_join<T: Into<String>>(msg: T) -> Self {
        AppError::TaskJoin(msg.into())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidUrl(err.to_string())
    }
}

impl From<ureq::Error> for AppError {
    fn from(err: ureq::Error) -> Self {
        AppError::HttpClient(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::TaskJoin(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
