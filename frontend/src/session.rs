//! 会话存储
//!
//! 整个客户端只有一个 `SessionStore`，在启动时构造并注入视图层。
//! 它是会话状态的唯一写入方：login / logout / refresh_silently / update_profile，
//! 以及拦截器刷新失败时的清除通知。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use learnify_shared::{LoginRequest, UpdateProfileRequest, UserProfile};

use crate::error::ApiResult;
use crate::http::{ApiClient, TokenEvent};

type SessionListener = Rc<dyn Fn(&Session)>;

/// 会话快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
    /// 启动时的静默刷新尚未结束
    pub loading: bool,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Initializing
        } else if self.is_authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }

    fn clear(&mut self) {
        self.access_token = None;
        self.is_authenticated = false;
        self.user = None;
    }
}

/// 会话生命周期
///
/// `Initializing` 只在启动时出现一次；`Disposed` 是终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Authenticated,
    Unauthenticated,
    Disposed,
}

struct SessionInner {
    api: ApiClient,
    state: RefCell<Session>,
    listeners: RefCell<Vec<SessionListener>>,
    disposed: Cell<bool>,
}

/// 会话存储（廉价 Clone，内部共享）
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

impl SessionStore {
    /// 以 token 存储中的现有 token 初始化，并订阅拦截器的 token 事件
    pub fn new(api: ApiClient) -> Self {
        let token = api.token();
        let state = Session {
            is_authenticated: token.is_some(),
            access_token: token,
            user: None,
            loading: true,
        };

        let inner = Rc::new(SessionInner {
            api: api.clone(),
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
            disposed: Cell::new(false),
        });

        // 弱引用，避免 ApiClient 与会话互相持有
        let weak = Rc::downgrade(&inner);
        api.on_token_change(move |event| {
            if let Some(inner) = weak.upgrade() {
                SessionStore { inner }.on_token_event(event);
            }
        });

        Self { inner }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.inner.disposed.get() {
            SessionPhase::Disposed
        } else {
            self.inner.state.borrow().phase()
        }
    }

    /// 订阅会话变化，每次变化都会收到完整快照
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        if self.inner.disposed.get() {
            return;
        }
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// 解除所有订阅，之后的状态变化不再通知
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        self.inner.listeners.borrow_mut().clear();
        self.inner.api.clear_listeners();
        tracing::debug!("session disposed");
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state);
            state.clone()
        };

        if self.inner.disposed.get() {
            return;
        }
        let listeners: Vec<SessionListener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn on_token_event(&self, event: &TokenEvent) {
        match event {
            TokenEvent::Refreshed(token) => {
                let token = token.clone();
                self.update(|s| s.access_token = Some(token));
            }
            TokenEvent::Cleared => {
                tracing::info!("access token could not be refreshed, session cleared");
                self.update(Session::clear);
            }
        }
    }

    // =========================================================
    // 会话操作
    // =========================================================

    /// 登录并拉取用户信息
    ///
    /// 登录请求失败时什么都不改变。拉取资料失败时，若存储的仍是本次写入的
    /// token 则恢复调用前的 token；若拦截器已刷新失败并清除了会话，则保持清除。
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<UserProfile> {
        let api = &self.inner.api;
        let token = api.login(credentials).await?.access_token;

        let previous = api.token();
        api.store_token(&token);

        match api.get_me().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "logged in");
                let cached = user.clone();
                self.update(move |s| {
                    s.access_token = Some(token);
                    s.is_authenticated = true;
                    s.user = Some(cached);
                });
                Ok(user)
            }
            Err(e) => {
                if api.token().as_deref() != Some(token.as_str()) {
                    tracing::warn!(error = %e, "profile fetch after login failed, session already cleared");
                    return Err(e);
                }
                tracing::warn!(error = %e, "profile fetch after login failed, rolling back");
                match previous {
                    Some(previous) => api.store_token(&previous),
                    None => api.clear_token(),
                }
                Err(e)
            }
        }
    }

    /// 注销：服务端调用尽力而为，本地状态总是清除
    pub async fn logout(&self) {
        if let Err(e) = self.inner.api.logout().await {
            tracing::warn!(error = %e, "logout request failed, clearing local session anyway");
        }
        self.inner.api.clear_token();
        self.update(Session::clear);
        tracing::info!("logged out");
    }

    /// 启动时尝试用 refresh cookie 恢复会话
    ///
    /// 从不返回错误，结束时 `loading` 一定为 false。
    pub async fn refresh_silently(&self) -> bool {
        let api = &self.inner.api;

        let restored = match api.refresh().await {
            Ok(token) => match api.get_me().await {
                Ok(user) => Some((token, user)),
                Err(e) => {
                    tracing::warn!(error = %e, "profile fetch after refresh failed");
                    None
                }
            },
            Err(e) => {
                tracing::debug!(status = ?e.status, "no session to restore");
                None
            }
        };

        match restored {
            Some((token, user)) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.update(move |s| {
                    s.access_token = Some(token);
                    s.is_authenticated = true;
                    s.user = Some(user);
                    s.loading = false;
                });
                true
            }
            None => {
                api.clear_token();
                self.update(|s| {
                    s.clear();
                    s.loading = false;
                });
                false
            }
        }
    }

    /// 更新个人资料，成功后替换缓存的用户
    pub async fn update_profile(&self, data: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        let user = self.inner.api.update_me(data).await?;
        let cached = user.clone();
        self.update(move |s| s.user = Some(cached));
        Ok(user)
    }
}
