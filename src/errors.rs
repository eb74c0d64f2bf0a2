use std::fmt;

/// Reasons a create/update request is rejected before touching the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    EmptyUrl,
    InvalidProtocol(String),
    UrlTooLong { length: usize, max: usize },
    UnknownOwner(String),
    InvalidLimit,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. URL must start with http:// or https://",
                proto
            ),
            Self::UrlTooLong { length, max } => {
                write!(f, "URL is too long ({} characters, maximum {})", length, max)
            }
            Self::UnknownOwner(id) => write!(f, "User not found: {}", id),
            Self::InvalidLimit => write!(f, "Access limit must be greater than zero"),
        }
    }
}

/// Coarse failure category reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Expired,
    LimitReached,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TinylinkError {
    InvalidInput(InvalidInput),
    NotFound(String),
    Expired(String),
    LimitReached(String),
    CodeSpaceExhausted(String),
    Config(String),
    Runtime(String),
}

impl TinylinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkError::InvalidInput(_) => "E001",
            TinylinkError::NotFound(_) => "E002",
            TinylinkError::Expired(_) => "E003",
            TinylinkError::LimitReached(_) => "E004",
            TinylinkError::CodeSpaceExhausted(_) => "E005",
            TinylinkError::Config(_) => "E006",
            TinylinkError::Runtime(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkError::InvalidInput(_) => "Invalid Input",
            TinylinkError::NotFound(_) => "Link Not Found",
            TinylinkError::Expired(_) => "Link Expired",
            TinylinkError::LimitReached(_) => "Access Limit Reached",
            TinylinkError::CodeSpaceExhausted(_) => "Short Code Space Exhausted",
            TinylinkError::Config(_) => "Configuration Error",
            TinylinkError::Runtime(_) => "Runtime Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            TinylinkError::InvalidInput(reason) => reason.to_string(),
            TinylinkError::NotFound(msg)
            | TinylinkError::Expired(msg)
            | TinylinkError::LimitReached(msg)
            | TinylinkError::CodeSpaceExhausted(msg)
            | TinylinkError::Config(msg)
            | TinylinkError::Runtime(msg) => msg.clone(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TinylinkError::InvalidInput(_) => ErrorKind::InvalidInput,
            TinylinkError::NotFound(_) => ErrorKind::NotFound,
            TinylinkError::Expired(_) => ErrorKind::Expired,
            TinylinkError::LimitReached(_) => ErrorKind::LimitReached,
            TinylinkError::CodeSpaceExhausted(_)
            | TinylinkError::Config(_)
            | TinylinkError::Runtime(_) => ErrorKind::Internal,
        }
    }

    /// 格式化为彩色输出
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

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinylinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinylinkError {}

// 便捷的构造函数
impl TinylinkError {
    pub fn invalid_input(reason: InvalidInput) -> Self {
        TinylinkError::InvalidInput(reason)
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinylinkError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Expired(msg.into())
    }

    pub fn limit_reached<T: Into<String>>(msg: T) -> Self {
        TinylinkError::LimitReached(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        TinylinkError::CodeSpaceExhausted(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Config(msg.into())
    }

    pub fn runtime<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Runtime(msg.into())
    }
}

impl From<InvalidInput> for TinylinkError {
    fn from(reason: InvalidInput) -> Self {
        TinylinkError::InvalidInput(reason)
    }
}

impl From<config::ConfigError> for TinylinkError {
    fn from(err: config::ConfigError) -> Self {
        TinylinkError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TinylinkError {
    fn from(err: toml::ser::Error) -> Self {
        TinylinkError::Config(err.to_string())
    }
}

impl From<std::io::Error> for TinylinkError {
    fn from(err: std::io::Error) -> Self {
        TinylinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinylinkError>;
