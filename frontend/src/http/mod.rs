//! HTTP 客户端层
//!
//! - `transport`: 传输抽象（浏览器实现见 `web::http`）
//! - `token`: access token 持久化抽象
//! - `client`: 认证拦截与 JSON 便捷方法

mod client;
mod token;
mod transport;

pub use client::{ApiClient, TokenEvent};
pub use token::{MemoryTokenStore, TokenStore};
pub use transport::{HttpClient, HttpRequest, HttpResponse, TransportError};

#[cfg(test)]
pub use transport::{MockHttpClient, MockReply};
