//! 认证模块
//!
//! 把 `SessionStore` 接入 Leptos 的响应式系统，与路由系统解耦。
//! 路由服务通过注入的守卫信号来检查认证状态。

use leptos::prelude::*;
use leptos::task::spawn_local;
use learnify_shared::{LoginRequest, UpdateProfileRequest, UserProfile};

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::session::{Session, SessionStore};
use crate::web::route::GuardState;

/// 认证上下文
///
/// 会话快照以信号形式暴露；`SessionStore` 不是 Send，放在本地存储的 `StoredValue` 中。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话快照（只读）
    pub state: ReadSignal<Session>,
    store: StoredValue<SessionStore, LocalStorage>,
}

impl AuthContext {
    /// 包装会话存储，会话每次变化都会写入信号
    pub fn new(store: SessionStore) -> Self {
        let (state, set_state) = signal(store.snapshot());
        store.subscribe(move |session| set_state.set(session.clone()));

        Self {
            state,
            store: StoredValue::new_local(store),
        }
    }

    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }

    pub fn api(&self) -> ApiClient {
        self.store.with_value(|s| s.api().clone())
    }

    /// 获取守卫信号（用于路由服务注入）
    ///
    /// 只有 `loading` 或 `is_authenticated` 变化时才通知下游，修改资料不会触发。
    pub fn guard_signal(&self) -> Signal<GuardState> {
        let state = self.state;
        Memo::new(move |_| {
            state.with(|s| GuardState {
                loading: s.loading,
                is_authenticated: s.is_authenticated,
            })
        })
        .into()
    }

    pub fn user_signal(&self) -> Signal<Option<UserProfile>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    /// 解除会话订阅，根组件卸载时调用
    pub fn dispose(&self) {
        self.store.try_with_value(SessionStore::dispose);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 启动时尝试用 refresh cookie 静默恢复会话，结束后 `loading` 变为 false。
pub fn init_auth(ctx: &AuthContext) {
    let store = ctx.store();
    spawn_local(async move {
        let restored = store.refresh_silently().await;
        tracing::debug!(restored, "initial session check finished");
    });
}

/// 登录
///
/// 成功后的跳转由路由服务监听会话变化自动完成。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> ApiResult<UserProfile> {
    ctx.store().login(&LoginRequest { email, password }).await
}

/// 注销并清除状态
pub async fn logout(ctx: &AuthContext) {
    ctx.store().logout().await;
}

pub async fn update_profile(ctx: &AuthContext, data: UpdateProfileRequest) -> ApiResult<UserProfile> {
    ctx.store().update_profile(&data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::{MemoryTokenStore, MockHttpClient};
    use learnify_shared::HttpMethod;
    use serde_json::json;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "http://api.test";

    fn profile(first_name: &str) -> serde_json::Value {
        json!({
            "id": 7,
            "firstName": first_name,
            "lastName": "Lee",
            "email": "a@b.com",
            "role": "STUDENT"
        })
    }

    #[tokio::test]
    async fn test_guard_ignores_profile_updates() {
        let owner = Owner::new();
        owner.set();

        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(HttpMethod::Post, &format!("{}/auth/refresh", BASE), 200, json!({ "accessToken": "T1" }));
        mock.mock_response(HttpMethod::Get, &format!("{}/me", BASE), 200, profile("Ana"));
        mock.mock_response(HttpMethod::Put, &format!("{}/me", BASE), 200, profile("Anna"));
        let api = ApiClient::new(ClientConfig::new(BASE), mock, Rc::new(MemoryTokenStore::new()));
        let ctx = AuthContext::new(SessionStore::new(api));

        let guard = ctx.guard_signal();
        let runs = Arc::new(AtomicUsize::new(0));
        let downstream = Memo::new({
            let runs = runs.clone();
            move |_| {
                runs.fetch_add(1, Ordering::SeqCst);
                guard.get()
            }
        });
        assert!(downstream.get().loading);

        assert!(ctx.store().refresh_silently().await);
        assert_eq!(
            downstream.get(),
            GuardState {
                loading: false,
                is_authenticated: true
            }
        );
        let after_restore = runs.load(Ordering::SeqCst);

        let data = UpdateProfileRequest {
            first_name: "Anna".to_string(),
            last_name: "Lee".to_string(),
        };
        update_profile(&ctx, data).await.unwrap();

        // 用户信息已变化，守卫的下游不重新计算
        assert_eq!(ctx.user_signal().get().map(|u| u.first_name).as_deref(), Some("Anna"));
        assert!(!downstream.get().loading);
        assert_eq!(runs.load(Ordering::SeqCst), after_restore);
    }
}
