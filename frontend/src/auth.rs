//! 会话模块
//!
//! 管理登录会话，与路由系统解耦：路由守卫只消费这里导出的派生信号。
//!
//! 生命周期：挂载时若存在令牌则进入 pending（`loading = true`）并拉取
//! `/user/profile`；校验失败一律清除令牌回到未登录态。登录/登出都会
//! 递增 epoch，使仍在途的 profile 响应作废，杜绝旧响应覆盖新会话。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::web::LocalStorage;
use tokomo_shared::User;

/// 会话状态
#[derive(Clone, Default)]
pub struct SessionState {
    /// 当前用户（仅校验通过后存在）
    pub user: Option<User>,
    /// 会话是否仍在校验中
    pub loading: bool,
}

/// 会话上下文
///
/// 包含读写信号与 epoch 计数器，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
    /// 每次登录/登出递增；在途的 profile 响应凭它判断是否已过期
    epoch: RwSignal<u64>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState {
            user: None,
            // 存在令牌时以 pending 态启动，守卫据此延迟判定
            loading: LocalStorage::token().is_some(),
        });
        Self {
            state,
            set_state,
            epoch: RwSignal::new(0),
        }
    }

    /// 登录状态信号（注入路由守卫）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.is_some()))
    }

    /// 管理员信号（注入路由守卫）
    pub fn is_admin_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.as_ref().is_some_and(User::is_admin)))
    }

    /// 会话解析中信号（注入路由守卫）
    pub fn is_resolving_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.loading))
    }

    /// 当前用户派生信号
    pub fn user_signal(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    fn bump_epoch(&self) -> u64 {
        let next = self.epoch.get_untracked() + 1;
        self.epoch.set(next);
        next
    }
}

/// 从 Context 获取会话上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化会话：有令牌则校验，无令牌直接进入未登录态
pub fn init_session(ctx: AuthContext) {
    if LocalStorage::token().is_some() {
        let ticket = ctx.epoch.get_untracked();
        spawn_local(fetch_profile(ctx, ticket));
    } else {
        ctx.set_state.update(|s| s.loading = false);
    }
}

/// 登录成功后持久化令牌并拉取用户信息
pub async fn login(ctx: AuthContext, token: String, user: User) {
    let ticket = ctx.bump_epoch();
    LocalStorage::set_token(&token);
    // 登录响应已附带用户，立即可用；随后仍以 profile 为准刷新一次
    ctx.set_state.update(|s| {
        s.user = Some(user);
        s.loading = false;
    });
    fetch_profile(ctx, ticket).await;
}

/// 登出：同步完成，无网络请求
pub fn logout(ctx: AuthContext) {
    ctx.bump_epoch();
    LocalStorage::clear_token();
    ctx.set_state.update(|s| {
        s.user = None;
        s.loading = false;
    });
    // 不需要手动导航，路由服务监听会话信号并自动重定向
}

/// 重新拉取用户信息（积分、VIP 到期时间等发生变化后调用）
pub fn refresh_user(ctx: AuthContext) {
    if LocalStorage::token().is_some() {
        let ticket = ctx.epoch.get_untracked();
        spawn_local(fetch_profile(ctx, ticket));
    }
}

/// 拉取 `/user/profile` 并落地会话
///
/// 失败（网络或任何非 2xx）一律清除令牌；epoch 不再匹配的响应直接丢弃。
async fn fetch_profile(ctx: AuthContext, ticket: u64) {
    let api = TokomoApi::default();
    let result = api.profile().await;

    if ctx.epoch.get_untracked() != ticket {
        web_sys::console::log_1(&"[Auth] Stale profile response discarded.".into());
        return;
    }

    match result {
        Ok(user) => ctx.set_state.update(|s| {
            s.user = Some(user);
            s.loading = false;
        }),
        Err(_) => {
            web_sys::console::log_1(&"[Auth] Session check failed. Token cleared.".into());
            LocalStorage::clear_token();
            ctx.set_state.update(|s| {
                s.user = None;
                s.loading = false;
            });
        }
    }
}
