//! 游戏库：已购买的游戏列表

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::copy::CopyButton;
use crate::components::pagination::Pager;
use crate::components::toast::use_toast;
use crate::web::RequestSeq;
use tokomo_shared::{Pagination, PurchasedGame, date};

const PAGE_SIZE: u32 = 10;

#[component]
pub fn LibraryPage() -> impl IntoView {
    let toast = use_toast();

    let (games, set_games) = signal(Vec::<PurchasedGame>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (page, set_page) = signal(1u32);

    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move |page: u32| {
            let ticket = seq.issue();
            let seq = seq.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = TokomoApi::default().purchased_games(page, PAGE_SIZE).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(r) => {
                        set_games.set(r.games);
                        set_pagination.set(r.pagination);
                    }
                    Err(e) => toast.error(format!("加载游戏库失败: {e}")),
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new(move |_| load(page.get()));

    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-bold">"我的游戏库"</h2>

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
                <Show
                    when=move || !games.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-16 text-base-content/50">
                                "还没有购买过游戏"
                            </div>
                        }
                    }
                >
                    <div class="space-y-3">
                        <For
                            each=move || games.get()
                            key=|g| g.purchase_id
                            children=move |g| {
                                let name = g.game_name;
                                let game_type = g.game_type;
                                let purchase_date = date::format_date(&g.purchase_date);
                                let url = g.download_url;
                                let password = g.password;
                                let extract_password = g.extract_password;
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body py-4">
                                            <div class="flex items-center justify-between">
                                                <h3 class="font-bold">{name}</h3>
                                                <span class="text-xs opacity-60">
                                                    "购买于 " {purchase_date}
                                                </span>
                                            </div>
                                            <div class="flex flex-wrap gap-2">
                                                {game_type
                                                    .map(|t| {
                                                        view! { <span class="badge badge-ghost">{t}</span> }
                                                    })}
                                            </div>
                                            <div class="flex flex-wrap items-center gap-x-6 gap-y-1 text-sm">
                                                <span class="flex items-center gap-1">
                                                    <a
                                                        href=url.clone()
                                                        target="_blank"
                                                        class="link link-primary break-all"
                                                    >
                                                        "下载地址"
                                                    </a>
                                                    <CopyButton text=Signal::derive({
                                                        let url = url.clone();
                                                        move || url.clone()
                                                    }) />
                                                </span>
                                                {password
                                                    .map(|p| {
                                                        view! {
                                                            <span class="flex items-center gap-1">
                                                                "访问密码: "
                                                                <span class="font-mono">{p.clone()}</span>
                                                                <CopyButton text=Signal::derive(move || p.clone()) />
                                                            </span>
                                                        }
                                                    })}
                                                {extract_password
                                                    .map(|p| {
                                                        view! {
                                                            <span class="flex items-center gap-1">
                                                                "解压密码: "
                                                                <span class="font-mono">{p.clone()}</span>
                                                                <CopyButton text=Signal::derive(move || p.clone()) />
                                                            </span>
                                                        }
                                                    })}
                                            </div>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <Pager
                page=page
                total_pages=Signal::derive(move || pagination.get().total_pages)
                on_page=Callback::new(move |p: u32| set_page.set(p))
            />
        </div>
    }
}
