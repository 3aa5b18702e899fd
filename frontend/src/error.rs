//! 统一错误模型
//!
//! 所有请求失败在 HTTP 边界被归一化为 `NormalizedError`，
//! UI 只需展示 `message` 以及按字段的 `errors`。

use std::collections::BTreeMap;

use serde_json::Value;

const MSG_NETWORK: &str = "Cannot connect to server. Please check your internet.";
const MSG_VALIDATION: &str = "Please correct the errors below.";
const MSG_UNAUTHORIZED: &str = "Invalid email or password.";
const MSG_FORBIDDEN: &str = "Access denied (Account disabled or forbidden).";
const MSG_NOT_FOUND: &str = "Resource not found.";
const MSG_SERVER: &str = "Server error. Please try again later.";
const MSG_UNEXPECTED: &str = "An unexpected error occurred.";
const MSG_BAD_BODY: &str = "Unexpected response from server.";

pub type ApiResult<T> = Result<T, NormalizedError>;

/// 错误大类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 未收到任何响应
    Network,
    /// 收到了带状态码的响应
    Http,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct NormalizedError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
    /// 字段名 -> 校验信息
    pub errors: BTreeMap<String, String>,
}

impl NormalizedError {
    pub fn network() -> Self {
        Self {
            kind: ErrorKind::Network,
            status: None,
            message: MSG_NETWORK.to_string(),
            errors: BTreeMap::new(),
        }
    }

    /// 根据状态码与响应体构造
    pub fn from_response(status: u16, body: &str) -> Self {
        let mut errors = BTreeMap::new();

        let message = match status {
            400 => match serde_json::from_str::<Value>(body) {
                Ok(Value::Object(map)) => match map.get("error").and_then(Value::as_str) {
                    Some(error) => error.to_string(),
                    None => {
                        for (field, value) in &map {
                            let text = match value {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            };
                            errors.insert(field.clone(), text);
                        }
                        MSG_VALIDATION.to_string()
                    }
                },
                _ => MSG_VALIDATION.to_string(),
            },
            401 => MSG_UNAUTHORIZED.to_string(),
            403 => MSG_FORBIDDEN.to_string(),
            404 => MSG_NOT_FOUND.to_string(),
            s if s >= 500 => MSG_SERVER.to_string(),
            _ => MSG_UNEXPECTED.to_string(),
        };

        Self {
            kind: ErrorKind::Http,
            status: Some(status),
            message,
            errors,
        }
    }

    /// 2xx 但响应体无法解码
    pub fn bad_body(status: u16) -> Self {
        Self {
            kind: ErrorKind::Http,
            status: Some(status),
            message: MSG_BAD_BODY.to_string(),
            errors: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }
}
