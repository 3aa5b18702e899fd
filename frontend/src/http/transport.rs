//! HTTP 传输抽象层
//!
//! `HttpClient` 只负责把一个请求发出去并拿回状态码和响应体，
//! 认证、重试与错误归一化都在上层 `ApiClient` 中完成。

use learnify_shared::HttpMethod;
use serde::de::DeserializeOwned;

#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::collections::{HashMap, VecDeque};

/// 传输层错误：没有拿到任何响应
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request build failed: {0}")]
    RequestBuild(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("response body read failed: {0}")]
    Body(String),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    /// 按名称查找请求头（大小写不敏感）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP 客户端特性
///
/// 浏览器环境下的 future 不是 Send 的，因此使用 `?Send`。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Clone)]
pub enum MockReply {
    /// 固定返回
    Status(u16, String),
    /// 仅当携带指定 token 时返回 ok，否则 401
    RequireToken { token: String, status: u16, body: String },
    /// 模拟断网
    NetworkDown,
}

#[cfg(test)]
pub struct MockHttpClient {
    /// (Method, URL) -> 依次消费的响应；只剩一个时重复使用
    routes: RefCell<HashMap<(HttpMethod, String), VecDeque<MockReply>>>,
    /// 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
    /// 每次响应前让出一次执行权，用于构造并发交错
    yield_before_reply: Cell<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            routes: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            yield_before_reply: Cell::new(false),
        }
    }

    pub fn on(&self, method: HttpMethod, url: &str, reply: MockReply) {
        self.routes
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.on(method, url, MockReply::Status(status, body.to_string()));
    }

    pub fn set_yield(&self, enabled: bool) {
        self.yield_before_reply.set(enabled);
    }

    pub fn count(&self, method: HttpMethod, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    pub fn last_request(&self, method: HttpMethod, url: &str) -> Option<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find(|r| r.method == method && r.url == url)
            .cloned()
    }

    fn next_reply(&self, method: HttpMethod, url: &str) -> Option<MockReply> {
        let mut routes = self.routes.borrow_mut();
        let queue = routes.get_mut(&(method, url.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(req.clone());

        if self.yield_before_reply.get() {
            tokio::task::yield_now().await;
        }

        match self.next_reply(req.method, &req.url) {
            Some(MockReply::Status(status, body)) => Ok(HttpResponse { status, body }),
            Some(MockReply::RequireToken { token, status, body }) => {
                let expected = format!("Bearer {}", token);
                if req.header("Authorization") == Some(expected.as_str()) {
                    Ok(HttpResponse { status, body })
                } else {
                    Ok(HttpResponse {
                        status: 401,
                        body: String::new(),
                    })
                }
            }
            Some(MockReply::NetworkDown) => Err(TransportError::Network("connection refused".to_string())),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
