//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//!
//! 守卫依赖三个注入的会话信号：
//! - `is_authenticated`: 是否已登录
//! - `is_admin`: 是否管理员
//! - `is_resolving`: 会话仍在校验中（此时守卫延迟执行，出口渲染占位符）

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前浏览器 query string（含 `?`，可为空）
fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
    is_admin: Signal<bool>,
    is_resolving: Signal<bool>,
}

impl RouterService {
    fn new(
        is_authenticated: Signal<bool>,
        is_admin: Signal<bool>,
        is_resolving: Signal<bool>,
    ) -> Self {
        // 初始路由从 URL 解析；守卫在会话解析完成后由 Effect 补执行
        let initial_route = AppRoute::from_location(&current_path(), &current_query());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            is_admin,
            is_resolving,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 会话是否仍在校验（出口用它渲染占位符）
    pub fn is_resolving(&self) -> Signal<bool> {
        self.is_resolving
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 重定向（replaceState，不产生历史记录）
    pub fn replace(&self, route: AppRoute) {
        self.navigate_to_route(route, false);
    }

    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        // 会话未解析完成：先落地目标路由，守卫由 setup_session_guard 补执行。
        // 受保护页面此时由出口渲染占位符，不会发起任何受权限约束的请求。
        if self.is_resolving.get_untracked() {
            apply(target_route, use_push, self.set_route);
            return;
        }

        let target = self.run_guard(target_route);
        apply(target, use_push, self.set_route);
    }

    /// 守卫验证：返回实际应落地的路由
    fn run_guard(&self, target: AppRoute) -> AppRoute {
        let is_auth = self.is_authenticated.get_untracked();
        let is_admin = self.is_admin.get_untracked();

        if target.requires_auth() && !is_auth {
            web_sys::console::log_1(&"[Router] Access denied. Redirecting to auth.".into());
            return AppRoute::auth_failure_redirect();
        }
        if target.requires_admin() && !is_admin {
            web_sys::console::log_1(&"[Router] Admin only. Redirecting to home.".into());
            return AppRoute::admin_failure_redirect();
        }
        if target.should_redirect_when_authenticated() && is_auth {
            return AppRoute::Home;
        }
        target
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_location(&current_path(), &current_query());
            if service.is_resolving.get_untracked() {
                service.set_route.set(target);
                return;
            }
            let landed = service.run_guard(target.clone());
            if landed != target {
                replace_history_state(&landed.to_path());
            }
            service.set_route.set(landed);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化时对当前路由重新执行守卫
    ///
    /// 覆盖三种情况：初始会话解析完成、用户登录、用户登出。
    fn setup_session_guard(&self) {
        let service = *self;

        Effect::new(move |_| {
            // 订阅全部三个会话信号
            let resolving = service.is_resolving.get();
            let _ = service.is_authenticated.get();
            let _ = service.is_admin.get();

            if resolving {
                return;
            }

            let current = service.current_route.get_untracked();
            let landed = service.run_guard(current.clone());
            if landed != current {
                replace_history_state(&landed.to_path());
                service.set_route.set(landed);
            }
        });
    }
}

fn apply(route: AppRoute, use_push: bool, set_route: WriteSignal<AppRoute>) {
    if use_push {
        push_history_state(&route.to_path());
    } else {
        replace_history_state(&route.to_path());
    }
    set_route.set(route);
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    is_authenticated: Signal<bool>,
    is_admin: Signal<bool>,
    is_resolving: Signal<bool>,
) -> RouterService {
    let router = RouterService::new(is_authenticated, is_admin, is_resolving);

    router.init_popstate_listener();
    router.setup_session_guard();

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
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 登录状态信号
    is_authenticated: Signal<bool>,
    /// 管理员信号
    is_admin: Signal<bool>,
    /// 会话解析中信号
    is_resolving: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, is_admin, is_resolving);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
/// 会话解析期间，受保护路由渲染加载占位符，守卫延迟到解析完成。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        if router.is_resolving().get() && current.requires_auth() {
            return view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any();
        }
        matcher(current)
    }
}
