// ==========================================
// 赛事管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 来源相关错误 =====
    #[error("名单文件不存在: {0}")]
    SourceNotFound(String),

    #[error("来源模式不支持: {0}（仅支持 from_file/from_event_id/from_url）")]
    UnsupportedMode(String),

    #[error("远程名单拉取失败 ({url}): {message}")]
    FetchFailure { url: String, message: String },

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 赛组生成错误 =====
    #[error("赛级名称已存在: {0}")]
    DuplicateClassName(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    // ===== 数据库错误 =====
    #[error("注册表访问失败: {0}")]
    RegistryError(#[from] crate::repository::RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
