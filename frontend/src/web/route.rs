//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的访问级别以及守卫判定。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 公开首页
    #[default]
    Landing,
    Login,
    Register,
    /// 登录后的首页，按角色分派
    Home,
    /// 页面未找到
    NotFound,
}

/// 路由访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// 任何人都可访问
    Public,
    /// 仅未登录用户（登录、注册等）
    PublicOnly,
    /// 仅已登录用户
    Protected,
}

/// 守卫所需的会话信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuardState {
    pub loading: bool,
    pub is_authenticated: bool,
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话仍在初始化，什么都不渲染
    Wait,
    Allow,
    Redirect(AppRoute),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Self::Landing,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/home" => Self::Home,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Home => "/home",
            Self::NotFound => "/404",
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Landing | Self::Login | Self::Register => RouteAccess::PublicOnly,
            Self::Home => RouteAccess::Protected,
            Self::NotFound => RouteAccess::Public,
        }
    }

    /// 未登录访问受保护页面时的去向
    pub fn auth_failure_redirect() -> Self {
        Self::Landing
    }

    /// 已登录访问公开专属页面时的去向
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }

    /// **核心守卫逻辑**
    pub fn evaluate(&self, state: GuardState) -> GuardDecision {
        match self.access() {
            RouteAccess::Public => GuardDecision::Allow,
            _ if state.loading => GuardDecision::Wait,
            RouteAccess::Protected if !state.is_authenticated => {
                GuardDecision::Redirect(Self::auth_failure_redirect())
            }
            RouteAccess::PublicOnly if state.is_authenticated => {
                GuardDecision::Redirect(Self::auth_success_redirect())
            }
            _ => GuardDecision::Allow,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
