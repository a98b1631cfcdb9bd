// ==========================================
// 车间管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换目录/外部服务错误为用户可读的消息
// 说明: 外部服务失败均为可重试错误，不得破坏纯计算的输入快照
// ==========================================

use crate::catalog::error::CatalogError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入与状态错误
    // ==========================================
    #[error("无效输入 ({field}): {message}")]
    InvalidInput { field: String, message: String },

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("数据尚未加载: {0}")]
    NotLoaded(String),

    // ==========================================
    // 外部服务错误（可重试）
    // ==========================================
    #[error("外部服务调用失败 ({service}): {message}")]
    Collaborator { service: String, message: String },

    #[error("回收规则目录错误: {0}")]
    Catalog(#[from] CatalogError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        ApiError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn collaborator(service: &str, err: &anyhow::Error) -> Self {
        ApiError::Collaborator {
            service: service.to_string(),
            message: format!("{:#}", err),
        }
    }

    /// 是否为可重试错误（界面显示临时提示）
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Collaborator { .. } | ApiError::Catalog(CatalogError::LockError(_)))
    }
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
