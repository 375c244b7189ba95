//! 后台布局：侧边菜单 + 内容区
//!
//! 访问控制的第一道关卡在路由守卫（`web::router`）；这里只做兜底：
//! 会话解析中渲染占位符，解析完成但不是管理员时什么都不渲染
//! （此时守卫的重定向已经发出）。

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::route::{AdminSection, AppRoute};
use crate::web::router::use_router;

const MENU: &[(AdminSection, &str)] = &[
    (AdminSection::Dashboard, "概览"),
    (AdminSection::Users, "用户管理"),
    (AdminSection::Games, "游戏管理"),
    (AdminSection::RedeemCodes, "兑换码管理"),
    (AdminSection::VipCodes, "VIP码管理"),
    (AdminSection::Groups, "群组管理"),
    (AdminSection::Config, "站点配置"),
];

#[component]
pub fn AdminLayout(
    /// 当前所在子页面（用于菜单高亮）
    section: AdminSection,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let resolving = auth.is_resolving_signal();
    let is_admin = auth.is_admin_signal();
    // Show 的子闭包会被多次调用，children 先落入 StoredValue 再按需取用
    let children = StoredValue::new(children);

    view! {
        <Show
            when=move || !resolving.get()
            fallback=|| {
                view! {
                    <div class="flex items-center justify-center min-h-screen">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            }
        >
            <Show when=move || is_admin.get()>
                <div class="min-h-screen flex bg-base-200">
                    <aside class="w-56 bg-base-100 shadow-xl shrink-0">
                        <div class="p-4">
                            <a
                                class="text-xl font-bold text-primary cursor-pointer"
                                on:click=move |_| router.navigate(AppRoute::Home)
                            >
                                "Tokomo 后台"
                            </a>
                        </div>
                        <ul class="menu p-2 gap-1">
                            <For
                                each={|| MENU.iter().copied().collect::<Vec<_>>()}
                                key=|(s, _)| *s as u8
                                children=move |(item, label)| {
                                    view! {
                                        <li>
                                            <a
                                                class=move || {
                                                    if item == section { "active" } else { "" }
                                                }
                                                on:click=move |_| {
                                                    router.navigate(AppRoute::Admin(item))
                                                }
                                            >
                                                {label}
                                            </a>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </aside>
                    <main class="flex-1 p-4 md:p-8 overflow-x-auto">
                        {move || children.with_value(|c| c())}
                    </main>
                </div>
            </Show>
        </Show>
    }
}
