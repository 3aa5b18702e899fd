//! 带认证拦截的 API 客户端
//!
//! 每个请求的生命周期是一个显式的小状态机：
//!
//! ```text
//! sent ─┬─> 2xx ───────────────────────────────> Ok
//!       ├─> 401 (未重试, 非 refresh/login) ─> refresh ─┬─> 成功: retried, 重新 sent
//!       │                                            └─> 失败: 清除 token, Err(原 401)
//!       └─> 其它 ──────────────────────────────> Err
//! ```
//!
//! 并发的 401 共享同一个进行中的 refresh。

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use learnify_shared::{
    BEARER_PREFIX, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HttpMethod,
    TokenResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::token::TokenStore;
use super::transport::{HttpClient, HttpRequest, HttpResponse};
use crate::config::ClientConfig;
use crate::error::{ApiResult, NormalizedError};

type RefreshFuture = Shared<LocalBoxFuture<'static, ApiResult<String>>>;
type TokenListener = Rc<dyn Fn(&TokenEvent)>;

/// token 变化通知，由拦截器发出
#[derive(Debug, Clone, PartialEq)]
pub enum TokenEvent {
    /// 刷新成功，已写入新 token
    Refreshed(String),
    /// 刷新失败，token 已清除
    Cleared,
}

/// 进行中的原始请求
///
/// `retried` 是一次性标记：置位后该请求不会再触发刷新。
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<String>,
    retried: bool,
}

impl PendingRequest {
    pub fn new(method: HttpMethod, path: &str, body: Option<String>) -> Self {
        Self {
            method,
            path: path.to_string(),
            body,
            retried: false,
        }
    }
}

struct Inner {
    config: ClientConfig,
    transport: Rc<dyn HttpClient>,
    tokens: Rc<dyn TokenStore>,
    refresh_in_flight: RefCell<Option<RefreshFuture>>,
    listeners: Rc<RefCell<Vec<TokenListener>>>,
}

/// API 客户端（廉价 Clone，内部共享）
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn HttpClient>, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                transport,
                tokens,
                refresh_in_flight: RefCell::new(None),
                listeners: Rc::new(RefCell::new(Vec::new())),
            }),
        }
    }

    // --- Token 管理 ---

    pub fn token(&self) -> Option<String> {
        self.inner.tokens.load()
    }

    pub fn store_token(&self, token: &str) {
        self.inner.tokens.save(token);
    }

    pub fn clear_token(&self) {
        self.inner.tokens.clear();
    }

    /// 订阅 token 变化
    pub fn on_token_change(&self, listener: impl Fn(&TokenEvent) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn clear_listeners(&self) {
        self.inner.listeners.borrow_mut().clear();
    }

    // --- 核心：发送与拦截 ---

    /// 执行请求，遇到 401 时最多刷新并重试一次
    pub async fn execute(&self, mut request: PendingRequest) -> ApiResult<HttpResponse> {
        loop {
            let response = self.dispatch(&request).await?;
            if response.ok() {
                return Ok(response);
            }

            if response.status == 401 && self.should_refresh(&request) {
                request.retried = true;
                tracing::debug!(path = %request.path, "401 received, refreshing access token");
                if self.refresh_access_token().await.is_ok() {
                    continue;
                }
            }

            return Err(NormalizedError::from_response(response.status, &response.body));
        }
    }

    fn should_refresh(&self, request: &PendingRequest) -> bool {
        let config = &self.inner.config;
        !request.retried && request.path != config.refresh_path && request.path != config.login_path
    }

    async fn dispatch(&self, request: &PendingRequest) -> ApiResult<HttpResponse> {
        let url = self.inner.config.url(&request.path);
        send(&*self.inner.transport, &*self.inner.tokens, &url, request).await
    }

    /// 刷新 access token
    ///
    /// 已有刷新在进行时直接等待它的结果。成功后写入新 token，
    /// 任何失败都会清除 token 并通知订阅者。
    pub async fn refresh_access_token(&self) -> ApiResult<String> {
        let shared = {
            let mut slot = self.inner.refresh_in_flight.borrow_mut();
            match slot.as_ref() {
                Some(in_flight) => in_flight.clone(),
                None => {
                    let task = RefreshTask {
                        url: self.inner.config.url(&self.inner.config.refresh_path),
                        path: self.inner.config.refresh_path.clone(),
                        transport: self.inner.transport.clone(),
                        tokens: self.inner.tokens.clone(),
                        listeners: self.inner.listeners.clone(),
                    };
                    let owner = Rc::downgrade(&self.inner);
                    let fut = async move {
                        let result = task.run().await;
                        if let Some(inner) = owner.upgrade() {
                            inner.refresh_in_flight.borrow_mut().take();
                        }
                        result
                    }
                    .boxed_local()
                    .shared();
                    *slot = Some(fut.clone());
                    fut
                }
            }
        };
        shared.await
    }

    // --- JSON 便捷方法 ---

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> ApiResult<T> {
        let response = self.execute(PendingRequest::new(method, path, body)).await?;
        decode(&response)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(HttpMethod::Get, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(HttpMethod::Post, path, Some(encode(body)?)).await
    }

    /// 无请求体的 POST
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(HttpMethod::Post, path, None).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(HttpMethod::Put, path, Some(encode(body)?)).await
    }

    /// 只关心成败，忽略响应体
    pub async fn call(&self, method: HttpMethod, path: &str, body: Option<String>) -> ApiResult<()> {
        self.execute(PendingRequest::new(method, path, body))
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.call(HttpMethod::Delete, path, None).await
    }
}

/// 一次刷新所需的部件
///
/// 不持有 `Inner`：挂起的刷新本身就存放在 `Inner::refresh_in_flight` 中。
struct RefreshTask {
    url: String,
    path: String,
    transport: Rc<dyn HttpClient>,
    tokens: Rc<dyn TokenStore>,
    listeners: Rc<RefCell<Vec<TokenListener>>>,
}

impl RefreshTask {
    async fn run(self) -> ApiResult<String> {
        let request = PendingRequest::new(HttpMethod::Post, &self.path, None);
        let result = request_token(&*self.transport, &*self.tokens, &self.url, &request).await;

        match &result {
            Ok(token) => {
                self.tokens.save(token);
                tracing::info!("access token refreshed");
                emit(&self.listeners, &TokenEvent::Refreshed(token.clone()));
            }
            Err(e) => {
                tracing::warn!(status = ?e.status, "token refresh failed, clearing stored token");
                self.tokens.clear();
                emit(&self.listeners, &TokenEvent::Cleared);
            }
        }
        result
    }
}

fn emit(listeners: &RefCell<Vec<TokenListener>>, event: &TokenEvent) {
    // 先拷贝一份，回调里可能再次订阅
    let listeners: Vec<TokenListener> = listeners.borrow().clone();
    for listener in listeners {
        listener(event);
    }
}

/// 附加认证头并交给传输层
async fn send(
    transport: &dyn HttpClient,
    tokens: &dyn TokenStore,
    url: &str,
    request: &PendingRequest,
) -> ApiResult<HttpResponse> {
    let mut req = HttpRequest::new(url, request.method)
        .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
        .with_body(request.body.clone());

    if let Some(token) = tokens.load() {
        req = req.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
    }

    transport.send(req).await.map_err(|e| {
        tracing::warn!(
            method = request.method.as_str(),
            path = %request.path,
            error = %e,
            "request failed without response"
        );
        NormalizedError::network()
    })
}

/// 发送一次请求并解析 `{ accessToken }`，不经过拦截
async fn request_token(
    transport: &dyn HttpClient,
    tokens: &dyn TokenStore,
    url: &str,
    request: &PendingRequest,
) -> ApiResult<String> {
    let response = send(transport, tokens, url, request).await?;
    if !response.ok() {
        return Err(NormalizedError::from_response(response.status, &response.body));
    }
    response
        .json::<TokenResponse>()
        .map(|t| t.access_token)
        .map_err(|_| NormalizedError::bad_body(response.status))
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body).map_err(|e| {
        tracing::error!(error = %e, "failed to encode request body");
        NormalizedError::network()
    })
}

/// 空响应体按 JSON `null` 解析，使 `()` 与 `Option<T>` 可以直接接收 204
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    let body = response.body.trim();
    let body = if body.is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(status = response.status, error = %e, "failed to decode response body");
        NormalizedError::bad_body(response.status)
    })
}

#[cfg(test)]
mod tests;
