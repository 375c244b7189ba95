//! 后台概览
//!
//! 统计数字来自各列表接口 `limit=1` 的探测请求，只取 pagination.total。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::toast::use_toast;
use crate::web::route::{AdminSection, AppRoute};
use crate::web::router::use_router;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let router = use_router();
    let toast = use_toast();

    let (games_total, set_games_total) = signal(0u64);
    let (users_total, set_users_total) = signal(0u64);
    let (codes_total, set_codes_total) = signal(0u64);
    let (codes_unused, set_codes_unused) = signal(0u64);

    Effect::new(move |_| {
        spawn_local(async move {
            let api = TokomoApi::default();
            let games = api.list_games(1, 1, None).await;
            let users = api.list_users(1, 1, None).await;
            let codes = api.list_redeem_codes(1, 1, None, None).await;
            let unused = api.list_redeem_codes(1, 1, Some(false), None).await;

            match (games, users, codes, unused) {
                (Ok(g), Ok(u), Ok(c), Ok(f)) => {
                    set_games_total.set(g.pagination.total);
                    set_users_total.set(u.pagination.total);
                    set_codes_total.set(c.pagination.total);
                    set_codes_unused.set(f.pagination.total);
                }
                _ => toast.error("加载统计数据失败"),
            }
        });
    });

    let quick_actions: &[(AdminSection, &str, &str)] = &[
        (AdminSection::Games, "游戏管理", "上架、编辑和下架游戏"),
        (AdminSection::RedeemCodes, "兑换码管理", "生成和导入积分兑换码"),
        (AdminSection::VipCodes, "VIP码管理", "生成 VIP 码并绑定群组"),
        (AdminSection::Users, "用户管理", "调整积分和 VIP 有效期"),
    ];

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"概览"</h2>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"游戏总数"</div>
                    <div class="stat-value text-primary">{games_total}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"用户总数"</div>
                    <div class="stat-value text-secondary">{users_total}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"兑换码总数"</div>
                    <div class="stat-value">{codes_total}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"未使用兑换码"</div>
                    <div class="stat-value text-success">{codes_unused}</div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <For
                    each={
                        let actions = quick_actions.to_vec();
                        move || actions.clone()
                    }
                    key=|(s, _, _)| *s as u8
                    children=move |(section, title, desc)| {
                        view! {
                            <div
                                class="card bg-base-100 shadow hover:shadow-xl transition-shadow cursor-pointer"
                                on:click=move |_| router.navigate(AppRoute::Admin(section))
                            >
                                <div class="card-body">
                                    <h3 class="card-title">{title}</h3>
                                    <p class="text-base-content/60">{desc}</p>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
