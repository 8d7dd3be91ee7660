//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 评分流水线内部同样使用这些错误，但不会把它们抛给调用方，
//! 而是转换为哨兵评分结果（见 `grading` 模块）。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_essay_system_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum EssaySystemError {
            $($variant(String),)*
        }

        impl EssaySystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EssaySystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EssaySystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EssaySystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EssaySystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EssaySystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_essay_system_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    ModelConfig("E008", "Model Configuration Error"),
    ModelRequest("E009", "Model Request Error"),
    ModelResponse("E010", "Model Response Error"),
    Extraction("E011", "Document Extraction Error"),
    Authorization("E012", "Authorization Error"),
}

impl EssaySystemError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EssaySystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EssaySystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EssaySystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        EssaySystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EssaySystemError {
    fn from(err: std::io::Error) -> Self {
        EssaySystemError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EssaySystemError {
    fn from(err: serde_json::Error) -> Self {
        EssaySystemError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for EssaySystemError {
    fn from(err: reqwest::Error) -> Self {
        EssaySystemError::ModelRequest(err.to_string())
    }
}

impl From<lopdf::Error> for EssaySystemError {
    fn from(err: lopdf::Error) -> Self {
        EssaySystemError::Extraction(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EssaySystemError>;
