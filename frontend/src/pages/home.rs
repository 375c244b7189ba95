//! 首页：轮播图、两侧横幅、客服信息、搜索入口

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::carousel::Carousel;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use tokomo_shared::SiteConfig;

const HOT_TAGS: &[&str] = &["拔作", "RPG", "SLG", "汉化", "新作"];

#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();
    let toast = use_toast();

    let (config, set_config) = signal(SiteConfig::default());
    let (keyword, set_keyword) = signal(String::new());

    // 站点配置公开可读，挂载即拉取
    Effect::new(move |_| {
        spawn_local(async move {
            match TokomoApi::default().site_config().await {
                Ok(cfg) => set_config.set(cfg),
                Err(e) => toast.error(format!("加载站点配置失败: {e}")),
            }
        });
    });

    let search = move |q: String| {
        router.navigate(AppRoute::Search { q });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        search(keyword.get().trim().to_string());
    };

    let slides = Signal::derive(move || config.get().carousel);

    view! {
        <div class="space-y-6">
            // 轮播 + 两侧横幅
            <div class="grid grid-cols-1 lg:grid-cols-4 gap-4">
                <a
                    class="hidden lg:block"
                    href=move || config.get().banner_l.url
                    target="_blank"
                >
                    <div class="h-80 rounded-box bg-base-300 overflow-hidden">
                        <img
                            src=move || config.get().banner_l.url
                            alt=move || config.get().banner_l.title
                            class="w-full h-full object-cover"
                        />
                    </div>
                </a>
                <div class="lg:col-span-2">
                    <Carousel slides=slides />
                </div>
                <a
                    class="hidden lg:block"
                    href=move || config.get().banner_r.url
                    target="_blank"
                >
                    <div class="h-80 rounded-box bg-base-300 overflow-hidden">
                        <img
                            src=move || config.get().banner_r.url
                            alt=move || config.get().banner_r.title
                            class="w-full h-full object-cover"
                        />
                    </div>
                </a>
            </div>

            // 搜索
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body items-center">
                    <h2 class="card-title text-2xl">"找游戏"</h2>
                    <form class="join w-full max-w-xl" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="输入游戏名称或类型"
                            class="input input-bordered join-item w-full"
                            on:input=move |ev| set_keyword.set(event_target_value(&ev))
                            prop:value=keyword
                        />
                        <button type="submit" class="btn btn-primary join-item">
                            "搜索"
                        </button>
                    </form>
                    <div class="flex flex-wrap gap-2 mt-2">
                        <For
                            each={|| HOT_TAGS.iter().copied().collect::<Vec<_>>()}
                            key=|t| *t
                            children=move |tag| {
                                view! {
                                    <button
                                        class="badge badge-outline badge-lg cursor-pointer hover:badge-primary"
                                        on:click=move |_| search(tag.to_string())
                                    >
                                        {tag}
                                    </button>
                                }
                            }
                        />
                    </div>
                </div>
            </div>

            // 客服
            <Show when=move || !config.get().customer_service.qq.is_empty()>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body flex-row items-center gap-4">
                        <div class="avatar">
                            <div class="w-16 rounded-full">
                                <img src=move || config.get().customer_service.img alt="客服" />
                            </div>
                        </div>
                        <div>
                            <h3 class="font-bold">"联系客服"</h3>
                            <p class="text-sm opacity-70">
                                "QQ: " {move || config.get().customer_service.qq}
                            </p>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
