//! 搜索结果页
//!
//! 登录后走带访问标注的列表接口；翻页和改词可能乱序返回，
//! 用 `RequestSeq` 丢弃过期响应。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::pagination::Pager;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::{LocalStorage, RequestSeq};
use tokomo_shared::{GameWithAccess, Pagination};

const PAGE_SIZE: u32 = 12;

#[component]
pub fn SearchPage(
    /// 搜索关键词（来自 URL，可为空表示浏览全部）
    q: String,
) -> impl IntoView {
    let router = use_router();
    let toast = use_toast();

    let (games, set_games) = signal(Vec::<GameWithAccess>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (page, set_page) = signal(1u32);

    let seq = RequestSeq::new();
    let keyword = StoredValue::new(q.clone());

    let load = {
        let seq = seq.clone();
        move |page: u32| {
            let ticket = seq.issue();
            let seq = seq.clone();
            let q = keyword.get_value();
            set_loading.set(true);
            spawn_local(async move {
                let api = TokomoApi::default();
                let search = (!q.is_empty()).then_some(q.as_str());
                // 登录后用带权限标注的列表
                let result = if LocalStorage::token().is_some() {
                    api.list_games_with_access(page, PAGE_SIZE, search)
                        .await
                        .map(|r| (r.games, r.pagination))
                } else {
                    api.list_games(page, PAGE_SIZE, search)
                        .await
                        .map(|r| {
                            let games = r.games.into_iter().map(Into::into).collect();
                            (games, r.pagination)
                        })
                };
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok((list, p)) => {
                        set_games.set(list);
                        set_pagination.set(p);
                    }
                    Err(e) => toast.error(format!("搜索失败: {e}")),
                }
                set_loading.set(false);
            });
        }
    };

    // 初始加载
    {
        let load = load.clone();
        Effect::new(move |_| {
            load(page.get());
        });
    }

    let on_page = Callback::new(move |p: u32| set_page.set(p));

    let title = if q.is_empty() {
        "全部游戏".to_string()
    } else {
        format!("“{q}”的搜索结果")
    };

    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-bold">{title}</h2>

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
                                "没有找到相关游戏"
                            </div>
                        }
                    }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        <For
                            each=move || games.get()
                            key=|g| g.game.id
                            children=move |g| {
                                let id = g.game.id;
                                let name = g.game.game_name;
                                let game_type = g.game.game_type;
                                let purchased = g.is_purchased;
                                let price = if g.game.price == 0 {
                                    "免费".to_string()
                                } else {
                                    format!("{} 积分", g.game.price)
                                };
                                view! {
                                    <div
                                        class="card bg-base-100 shadow hover:shadow-xl transition-shadow cursor-pointer"
                                        on:click=move |_| {
                                            router.navigate(AppRoute::GameDetail { id })
                                        }
                                    >
                                        <div class="card-body">
                                            <h3 class="card-title text-base">{name}</h3>
                                            <div class="flex flex-wrap gap-2">
                                                {game_type
                                                    .map(|t| {
                                                        view! {
                                                            <span class="badge badge-ghost">{t}</span>
                                                        }
                                                    })}
                                                <Show when=move || purchased>
                                                    <span class="badge badge-success badge-outline">
                                                        "已购买"
                                                    </span>
                                                </Show>
                                            </div>
                                            <div class="card-actions justify-end items-center">
                                                <span class="text-primary font-bold">{price}</span>
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
                on_page=on_page
            />
        </div>
    }
}
