//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 守卫在三个时机执行：`navigate`、浏览器前进/后退（popstate）、会话状态变化。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision, GuardState};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// History 写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    /// URL 已由浏览器更新（popstate）
    Keep,
}

fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Keep => Ok(()),
    };
    if let Err(e) = result {
        tracing::warn!(path, error = ?e, "history update failed");
    }
}

/// 路由器服务
///
/// 通过注入的守卫信号与会话解耦，路由本身不知道会话的存在。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    guard: Signal<GuardState>,
}

impl RouterService {
    fn new(guard: Signal<GuardState>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            guard,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到指定路径
    pub fn navigate(&self, path: &str) {
        self.go(path, HistoryMode::Push);
    }

    /// 导航流程：解析 -> 守卫 -> 写入 History -> 更新路由
    fn go(&self, path: &str, mode: HistoryMode) {
        let target = AppRoute::from_path(path);

        match target.evaluate(self.guard.get_untracked()) {
            GuardDecision::Redirect(redirect) => {
                tracing::info!(from = %target, to = %redirect, "navigation redirected by guard");
                let mode = if mode == HistoryMode::Push {
                    HistoryMode::Push
                } else {
                    HistoryMode::Replace
                };
                write_history(redirect.to_path(), mode);
                self.set_route.set(redirect);
            }
            // 初始化期间先记录目标路由，会话就绪后由 Effect 再次判定
            GuardDecision::Wait | GuardDecision::Allow => {
                write_history(path, mode);
                self.set_route.set(target);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            router.go(&current_path(), HistoryMode::Keep);
        });

        if let Some(window) = web_sys::window() {
            if let Err(e) =
                window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            {
                tracing::warn!(error = ?e, "failed to register popstate listener");
            }
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化时重新判定当前路由
    fn setup_guard_effect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let guard = self.guard;

        Effect::new(move |_| {
            let state = guard.get();
            let route = current_route.get_untracked();

            if let GuardDecision::Redirect(redirect) = route.evaluate(state) {
                tracing::info!(
                    from = %route,
                    to = %redirect,
                    authenticated = state.is_authenticated,
                    "session changed, redirecting"
                );
                write_history(redirect.to_path(), HistoryMode::Replace);
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(guard: Signal<GuardState>) -> RouterService {
    let router = RouterService::new(guard);

    router.init_popstate_listener();
    router.setup_guard_effect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 守卫所需的会话信号
    guard: Signal<GuardState>,
    children: Children,
) -> impl IntoView {
    provide_router(guard);

    children()
}

/// 路由出口组件
///
/// 守卫放行时渲染匹配的视图；等待或即将重定向时什么都不渲染。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let view_state = guarded_route(router.current_route.into(), router.guard);

    move || match view_state.get() {
        (route, GuardDecision::Allow) => matcher(route),
        (_, GuardDecision::Wait | GuardDecision::Redirect(_)) => ().into_any(),
    }
}

/// 路由与守卫判定的组合，只在二者之一真正变化时通知视图
fn guarded_route(route: Signal<AppRoute>, guard: Signal<GuardState>) -> Memo<(AppRoute, GuardDecision)> {
    Memo::new(move |_| {
        let route = route.get();
        (route, route.evaluate(guard.get()))
    })
}

/// 站内链接，拦截点击并交给路由服务
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_outlet_rebuilds_only_on_decision_change() {
        let owner = Owner::new();
        owner.set();

        let route = RwSignal::new(AppRoute::Home);
        let guard = RwSignal::new(GuardState {
            loading: true,
            is_authenticated: false,
        });
        let view_state = guarded_route(route.into(), guard.into());

        let renders = Arc::new(AtomicUsize::new(0));
        let outlet = Memo::new({
            let renders = renders.clone();
            move |_| {
                renders.fetch_add(1, Ordering::SeqCst);
                view_state.get()
            }
        });
        assert_eq!(outlet.get(), (AppRoute::Home, GuardDecision::Wait));

        guard.set(GuardState {
            loading: false,
            is_authenticated: true,
        });
        assert_eq!(outlet.get(), (AppRoute::Home, GuardDecision::Allow));
        assert_eq!(renders.load(Ordering::SeqCst), 2);

        // 相同的守卫状态再次写入，不重建
        guard.set(GuardState {
            loading: false,
            is_authenticated: true,
        });
        assert_eq!(outlet.get(), (AppRoute::Home, GuardDecision::Allow));
        assert_eq!(renders.load(Ordering::SeqCst), 2);

        guard.set(GuardState {
            loading: false,
            is_authenticated: false,
        });
        assert_eq!(outlet.get(), (AppRoute::Home, GuardDecision::Redirect(AppRoute::Landing)));
        assert_eq!(renders.load(Ordering::SeqCst), 3);
    }
}
