//! Tokomo 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: REST 客户端
//! - `pages` / `layouts` / `components`: UI 层

mod api;
mod auth;

mod components {
    pub mod carousel;
    pub mod copy;
    pub mod footer;
    pub mod navbar;
    pub mod pagination;
    pub mod toast;
}

mod layouts {
    pub mod admin;
    pub mod public;
}

mod pages {
    pub mod auth;
    pub mod game_detail;
    pub mod home;
    pub mod library;
    pub mod profile;
    pub mod search;

    pub mod admin {
        pub mod config;
        pub mod dashboard;
        pub mod games;
        pub mod groups;
        pub mod redeem_codes;
        pub mod users;
        pub mod vip_codes;
    }
}

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装（路由、存储、定时器），
// 以减小 WASM 二进制体积；HTTP 走 gloo-net。
pub(crate) mod web;

use leptos::prelude::*;

use crate::auth::{AuthContext, init_session};
use crate::components::toast::{Toaster, provide_toast};
use crate::layouts::admin::AdminLayout;
use crate::layouts::public::PublicLayout;
use crate::pages::admin::config::AdminConfigPage;
use crate::pages::admin::dashboard::AdminDashboardPage;
use crate::pages::admin::games::AdminGamesPage;
use crate::pages::admin::groups::AdminGroupsPage;
use crate::pages::admin::redeem_codes::AdminRedeemCodesPage;
use crate::pages::admin::users::AdminUsersPage;
use crate::pages::admin::vip_codes::AdminVipCodesPage;
use crate::pages::auth::AuthPage;
use crate::pages::game_detail::GameDetailPage;
use crate::pages::home::HomePage;
use crate::pages::library::LibraryPage;
use crate::pages::profile::ProfilePage;
use crate::pages::search::SearchPage;
use crate::web::route::{AdminSection, AppRoute};
use crate::web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数：将路由映射到页面视图
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! {
            <PublicLayout>
                <HomePage />
            </PublicLayout>
        }
        .into_any(),
        AppRoute::Search { q } => view! {
            <PublicLayout>
                <SearchPage q=q />
            </PublicLayout>
        }
        .into_any(),
        AppRoute::GameDetail { id } => view! {
            <PublicLayout>
                <GameDetailPage id=id />
            </PublicLayout>
        }
        .into_any(),
        AppRoute::Library => view! {
            <PublicLayout>
                <LibraryPage />
            </PublicLayout>
        }
        .into_any(),
        AppRoute::Profile => view! {
            <PublicLayout>
                <ProfilePage />
            </PublicLayout>
        }
        .into_any(),
        AppRoute::Auth => view! {
            <PublicLayout>
                <AuthPage />
            </PublicLayout>
        }
        .into_any(),
        AppRoute::Admin(section) => view! {
            <PublicLayout>
                <AdminLayout section=section>
                    {move || admin_page(section)}
                </AdminLayout>
            </PublicLayout>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <PublicLayout>
                <NotFoundPage />
            </PublicLayout>
        }
        .into_any(),
    }
}

fn admin_page(section: AdminSection) -> AnyView {
    match section {
        AdminSection::Dashboard => view! { <AdminDashboardPage /> }.into_any(),
        AdminSection::Users => view! { <AdminUsersPage /> }.into_any(),
        AdminSection::Games => view! { <AdminGamesPage /> }.into_any(),
        AdminSection::RedeemCodes => view! { <AdminRedeemCodesPage /> }.into_any(),
        AdminSection::VipCodes => view! { <AdminVipCodesPage /> }.into_any(),
        AdminSection::Groups => view! { <AdminGroupsPage /> }.into_any(),
        AdminSection::Config => view! { <AdminConfigPage /> }.into_any(),
    }
}

#[component]
fn NotFoundPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div>
                    <h1 class="text-6xl font-bold">"404"</h1>
                    <p class="py-4 opacity-70">"页面不存在或已被移除"</p>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| router.navigate(AppRoute::Home)
                    >
                        "返回首页"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// 应用根组件
#[component]
pub fn App() -> impl IntoView {
    provide_toast();

    let auth = AuthContext::new();
    provide_context(auth);
    init_session(auth);

    view! {
        <Router
            is_authenticated=auth.is_authenticated_signal()
            is_admin=auth.is_admin_signal()
            is_resolving=auth.is_resolving_signal()
        >
            <Toaster />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
