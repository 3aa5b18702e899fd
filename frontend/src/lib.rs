//! Learnify 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `http`: 传输抽象与带 401 刷新拦截的 `ApiClient`
//! - `api`: 按资源划分的接口方法
//! - `session`: 唯一的会话存储
//! - `auth`: 会话接入 Leptos 响应式系统
//! - `web::route` / `web::router`: 路由定义与守卫
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod home;
    mod icons;
    pub mod landing;
    pub mod login;
    pub mod register;
}
mod config;
mod error;
mod generation;
mod http;
mod session;

use std::rc::Rc;

use crate::auth::{AuthContext, init_auth};
use crate::components::home::HomePage;
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::config::ClientConfig;
use crate::http::{ApiClient, MemoryTokenStore, TokenStore};
use crate::session::SessionStore;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::BrowserTokenStore;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};
use web::{BrowserTokenStore, FetchHttpClient};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// 组装客户端：配置 -> 传输 -> token 存储 -> ApiClient -> 会话
fn build_session() -> SessionStore {
    let config = ClientConfig::from_build_env();

    let tokens: Rc<dyn TokenStore> = if BrowserTokenStore::is_available() {
        Rc::new(BrowserTokenStore::new(config.token_storage_key.clone()))
    } else {
        tracing::warn!("localStorage unavailable, access token will not survive a reload");
        Rc::new(MemoryTokenStore::new())
    };
    let transport = Rc::new(FetchHttpClient::new(config.with_credentials));

    tracing::info!(base_url = %config.base_url, "api client configured");
    SessionStore::new(ApiClient::new(config, transport, tokens))
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建唯一的会话并放入 Context
    let auth_ctx = AuthContext::new(build_session());
    provide_context(auth_ctx);
    on_cleanup(move || auth_ctx.dispose());

    // 2. 启动时尝试静默恢复会话
    init_auth(&auth_ctx);

    // 3. 获取守卫信号，用于注入路由服务（解耦！）
    let guard = auth_ctx.guard_signal();

    view! {
        <Router guard=guard>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
