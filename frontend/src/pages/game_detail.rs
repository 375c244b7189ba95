//! 游戏详情页
//!
//! 未登录只展示基础信息，下载区锁定；登录后走详情接口拿访问判定。
//! 详情接口 401 说明令牌已失效：清会话并跳转登录页。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::auth::{logout, refresh_user, use_auth};
use crate::components::copy::CopyButton;
use crate::components::toast::use_toast;
use crate::web::LocalStorage;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use tokomo_shared::GameWithAccess;

#[component]
pub fn GameDetailPage(
    /// 游戏 id（来自 URL）
    id: i64,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toast = use_toast();

    let (game, set_game) = signal(Option::<GameWithAccess>::None);
    let (loading, set_loading) = signal(true);
    let (purchasing, set_purchasing) = signal(false);

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            let api = TokomoApi::default();
            if LocalStorage::token().is_some() {
                match api.game_details(id).await {
                    Ok(g) => set_game.set(Some(g)),
                    Err(e) if e.status() == Some(401) => {
                        // 令牌失效，会话拆除后去登录页
                        logout(auth);
                        router.navigate(AppRoute::Auth);
                        return;
                    }
                    Err(e) => toast.error(format!("加载游戏详情失败: {e}")),
                }
            } else {
                match api.get_game(id).await {
                    Ok(g) => set_game.set(Some(g.into())),
                    Err(e) => toast.error(format!("加载游戏详情失败: {e}")),
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let on_purchase = move |_| {
        set_purchasing.set(true);
        spawn_local(async move {
            match TokomoApi::default().purchase_game(id).await {
                Ok(()) => {
                    toast.success("购买成功");
                    // 积分已变化，详情和会话都要刷新
                    load();
                    refresh_user(auth);
                }
                Err(e) => toast.error(format!("购买失败: {e}")),
            }
            set_purchasing.set(false);
        });
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| {
                view! {
                    <div class="flex justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            }
        >
            {move || match game.get() {
                None => {
                    view! {
                        <div class="text-center py-16 text-base-content/50">"游戏不存在"</div>
                    }
                        .into_any()
                }
                Some(g) => {
                    let name = g.game.game_name.clone();
                    let game_type = g.game.game_type.clone();
                    let note = g.game.note.clone();
                    let price = g.game.price;
                    let download_url = g.game.download_url.clone();
                    let password = g.game.password.clone();
                    let extract_password = g.game.extract_password.clone();
                    let can_view = g.can_view_download;
                    let reason = g.access_reason.clone();
                    let purchased = g.is_purchased;
                    let logged_in = LocalStorage::token().is_some();

                    view! {
                        <div class="max-w-3xl mx-auto space-y-4">
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h2 class="card-title text-2xl">{name}</h2>
                                    <div class="flex flex-wrap gap-2">
                                        {game_type
                                            .map(|t| {
                                                view! { <span class="badge badge-ghost">{t}</span> }
                                            })}
                                        <Show when=move || purchased>
                                            <span class="badge badge-success badge-outline">
                                                "已购买"
                                            </span>
                                        </Show>
                                        <span class="badge badge-primary badge-outline">
                                            {if price == 0 {
                                                "免费".to_string()
                                            } else {
                                                format!("{price} 积分")
                                            }}
                                        </span>
                                    </div>
                                    {note
                                        .map(|n| {
                                            view! {
                                                <p class="text-base-content/70 whitespace-pre-wrap">
                                                    {n}
                                                </p>
                                            }
                                        })}
                                </div>
                            </div>

                            // 下载区
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h3 class="card-title">"下载"</h3>
                                    {if can_view {
                                        view! {
                                            <div class="space-y-2">
                                                <div class="flex items-center gap-2">
                                                    <span class="font-bold shrink-0">"下载地址:"</span>
                                                    <a
                                                        href=download_url.clone()
                                                        target="_blank"
                                                        class="link link-primary break-all"
                                                    >
                                                        {download_url.clone()}
                                                    </a>
                                                    <CopyButton text=Signal::derive({
                                                        let url = download_url.clone();
                                                        move || url.clone()
                                                    }) />
                                                </div>
                                                {password
                                                    .map(|p| {
                                                        view! {
                                                            <div class="flex items-center gap-2">
                                                                <span class="font-bold shrink-0">"访问密码:"</span>
                                                                <span class="font-mono">{p.clone()}</span>
                                                                <CopyButton text=Signal::derive(move || p.clone()) />
                                                            </div>
                                                        }
                                                    })}
                                                {extract_password
                                                    .map(|p| {
                                                        view! {
                                                            <div class="flex items-center gap-2">
                                                                <span class="font-bold shrink-0">"解压密码:"</span>
                                                                <span class="font-mono">{p.clone()}</span>
                                                                <CopyButton text=Signal::derive(move || p.clone()) />
                                                            </div>
                                                        }
                                                    })}
                                            </div>
                                        }
                                            .into_any()
                                    } else if !logged_in {
                                        view! {
                                            <div class="text-center py-6 space-y-3">
                                                <p class="text-base-content/60">"登录后查看下载信息"</p>
                                                <button
                                                    class="btn btn-primary"
                                                    on:click=move |_| router.navigate(AppRoute::Auth)
                                                >
                                                    "去登录"
                                                </button>
                                            </div>
                                        }
                                            .into_any()
                                    } else {
                                        view! {
                                            <div class="text-center py-6 space-y-3">
                                                <p class="text-base-content/60">
                                                    {reason
                                                        .unwrap_or_else(|| "暂无下载权限".to_string())}
                                                </p>
                                                <div class="flex justify-center gap-3">
                                                    <button
                                                        class="btn btn-primary"
                                                        disabled=move || purchasing.get()
                                                        on:click=on_purchase
                                                    >
                                                        {move || if purchasing.get() {
                                                            view! {
                                                                <span class="loading loading-spinner"></span>
                                                                "购买中..."
                                                            }
                                                                .into_any()
                                                        } else {
                                                            format!("{price} 积分购买").into_any()
                                                        }}
                                                    </button>
                                                    <button
                                                        class="btn btn-secondary btn-outline"
                                                        on:click=move |_| router.navigate(AppRoute::Profile)
                                                    >
                                                        "开通 VIP"
                                                    </button>
                                                </div>
                                            </div>
                                        }
                                            .into_any()
                                    }}
                                </div>
                            </div>
                        </div>
                    }
                        .into_any()
                }
            }}
        </Show>
    }
}
