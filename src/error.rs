//! 错误类型
//!
//! 列表加载失败以 [`FetchError`] 表示，最终折叠为加载状态 `Failed(message)`；
//! 新建失败以 [`SubmitError`] 表示，由表单页面展示为提示信息。

use crate::models::DraftField;

/// 响应体无法解析为预期结构
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to parse response from {endpoint}: {message}")]
pub struct ParseError {
    pub endpoint: String,
    pub message: String,
}

/// 列表加载失败
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// 网络传输错误
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 非 2xx 响应
    #[error("HTTP error! Status: {status}")]
    Status { endpoint: String, status: u16 },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

/// 本地必填/格式校验失败，发生在任何网络请求之前
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fields: {}", field_list(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn field_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn fields(&self) -> Vec<DraftField> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn message_for(&self, field: DraftField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// 新建记录失败
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 非 2xx 响应 (含服务端校验拒绝)
    #[error("HTTP error! Status: {status}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// 已有一次提交尚未返回
    #[error("a submission is already in flight")]
    InFlight,
}

/// 表格状态输入不合法
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("unknown column: {0:?}")]
    UnknownColumn(String),
    #[error("unknown sort direction: {0:?}")]
    UnknownDirection(String),
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(usize),
    #[error("invalid page number: {0:?}")]
    InvalidPage(String),
    #[error("invalid page size: {0:?}")]
    UnparsablePageSize(String),
}
