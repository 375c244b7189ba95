//! 前台顶栏

use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::web::route::{AdminSection, AppRoute};
use crate::web::router::use_router;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let user = auth.user_signal();
    let resolving = auth.is_resolving_signal();

    let on_logout = move |_| {
        logout(auth);
    };

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-40">
            <div class="flex-1">
                <a
                    class="btn btn-ghost text-xl text-primary font-bold"
                    on:click=move |_| router.navigate(AppRoute::Home)
                >
                    "Tokomo"
                </a>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || !resolving.get()
                    fallback=|| view! { <span class="loading loading-spinner loading-sm"></span> }
                >
                    {move || match user.get() {
                        Some(u) => {
                            let is_admin = u.is_admin();
                            view! {
                                <div class="dropdown dropdown-end dropdown-hover">
                                    <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                                        <span class="font-bold">{u.username.clone()}</span>
                                        <span class="badge badge-primary badge-outline">
                                            {u.points} " 积分"
                                        </span>
                                    </div>
                                    <ul
                                        tabindex="0"
                                        class="dropdown-content z-[1] menu p-2 shadow bg-base-100 rounded-box w-44"
                                    >
                                        <li>
                                            <a on:click=move |_| router.navigate(AppRoute::Profile)>
                                                "个人中心"
                                            </a>
                                        </li>
                                        <li>
                                            <a on:click=move |_| router.navigate(AppRoute::Library)>
                                                "游戏库"
                                            </a>
                                        </li>
                                        <Show when=move || is_admin>
                                            <li>
                                                <a on:click=move |_| {
                                                    router.navigate(AppRoute::Admin(AdminSection::Dashboard))
                                                }>
                                                    "管理后台"
                                                </a>
                                            </li>
                                        </Show>
                                        <li>
                                            <a class="text-error" on:click=on_logout>
                                                "退出登录"
                                            </a>
                                        </li>
                                    </ul>
                                </div>
                            }
                                .into_any()
                        }
                        None => {
                            view! {
                                <button
                                    class="btn btn-primary btn-sm"
                                    on:click=move |_| router.navigate(AppRoute::Auth)
                                >
                                    "登录"
                                </button>
                            }
                                .into_any()
                        }
                    }}
                </Show>
            </div>
        </div>
    }
}
