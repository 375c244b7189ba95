//! 站点配置
//!
//! 轮播图、左右横幅与客服信息的单例编辑器，整体保存。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::toast::use_toast;
use tokomo_shared::{CustomerService, ImageConfig, UpdateSiteConfigRequest};

#[component]
pub fn AdminConfigPage() -> impl IntoView {
    let toast = use_toast();

    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let carousel = RwSignal::new(Vec::<ImageConfig>::new());
    let (banner_l_url, set_banner_l_url) = signal(String::new());
    let (banner_l_title, set_banner_l_title) = signal(String::new());
    let (banner_r_url, set_banner_r_url) = signal(String::new());
    let (banner_r_title, set_banner_r_title) = signal(String::new());
    let (cs_img, set_cs_img) = signal(String::new());
    let (cs_qq, set_cs_qq) = signal(String::new());

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match TokomoApi::default().site_config().await {
                Ok(c) => {
                    carousel.set(c.carousel);
                    set_banner_l_url.set(c.banner_l.url);
                    set_banner_l_title.set(c.banner_l.title);
                    set_banner_r_url.set(c.banner_r.url);
                    set_banner_r_title.set(c.banner_r.title);
                    set_cs_img.set(c.customer_service.img);
                    set_cs_qq.set(c.customer_service.qq);
                }
                Err(e) => toast.error(format!("加载站点配置失败: {e}")),
            }
            set_loading.set(false);
        });
    };
    load();

    let add_slide = move |_| {
        carousel.update(|v| v.push(ImageConfig::default()));
    };

    let remove_slide = move |index: usize| {
        carousel.update(|v| {
            if index < v.len() {
                v.remove(index);
            }
        });
    };

    let on_save = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        // 丢弃没有图片地址的空行
        let slides: Vec<ImageConfig> = carousel
            .get_untracked()
            .into_iter()
            .filter(|s| !s.url.trim().is_empty())
            .collect();
        let req = UpdateSiteConfigRequest {
            carousel: slides,
            banner_l: ImageConfig {
                url: banner_l_url.get_untracked().trim().to_string(),
                title: banner_l_title.get_untracked().trim().to_string(),
            },
            banner_r: ImageConfig {
                url: banner_r_url.get_untracked().trim().to_string(),
                title: banner_r_title.get_untracked().trim().to_string(),
            },
            customer_service: CustomerService {
                img: cs_img.get_untracked().trim().to_string(),
                qq: cs_qq.get_untracked().trim().to_string(),
            },
        };
        set_saving.set(true);
        spawn_local(async move {
            match TokomoApi::default().update_site_config(&req).await {
                Ok(()) => {
                    toast.success("站点配置已保存");
                    load();
                }
                Err(e) => toast.error(format!("保存站点配置失败: {e}")),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-bold">"站点配置"</h2>

            <Show
                when=move || !loading.get()
                fallback=|| {
                    view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                }
            >
                <form class="space-y-4" on:submit=on_save>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <div class="flex items-center justify-between">
                                <h3 class="card-title text-base">"首页轮播图"</h3>
                                <button type="button" class="btn btn-sm" on:click=add_slide>
                                    "添加一张"
                                </button>
                            </div>
                            {move || {
                                let slides = carousel.get();
                                if slides.is_empty() {
                                    return view! {
                                        <p class="text-sm opacity-60">"暂无轮播图"</p>
                                    }
                                        .into_any();
                                }
                                slides
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, slide)| {
                                        view! {
                                            <div class="flex items-end gap-2">
                                                <div class="form-control flex-1">
                                                    <label class="label">
                                                        <span class="label-text">"图片地址"</span>
                                                    </label>
                                                    <input
                                                        type="url"
                                                        class="input input-bordered input-sm"
                                                        prop:value=slide.url.clone()
                                                        on:input=move |ev| {
                                                            let value = event_target_value(&ev);
                                                            carousel
                                                                .update(|v| {
                                                                    if let Some(s) = v.get_mut(i) {
                                                                        s.url = value;
                                                                    }
                                                                });
                                                        }
                                                    />
                                                </div>
                                                <div class="form-control flex-1">
                                                    <label class="label">
                                                        <span class="label-text">"标题"</span>
                                                    </label>
                                                    <input
                                                        type="text"
                                                        class="input input-bordered input-sm"
                                                        prop:value=slide.title.clone()
                                                        on:input=move |ev| {
                                                            let value = event_target_value(&ev);
                                                            carousel
                                                                .update(|v| {
                                                                    if let Some(s) = v.get_mut(i) {
                                                                        s.title = value;
                                                                    }
                                                                });
                                                        }
                                                    />
                                                </div>
                                                <button
                                                    type="button"
                                                    class="btn btn-ghost btn-sm text-error"
                                                    on:click=move |_| remove_slide(i)
                                                >
                                                    "删除"
                                                </button>
                                            </div>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                                    .into_any()
                            }}
                        </div>
                    </div>

                    <div class="grid md:grid-cols-2 gap-4">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="card-title text-base">"左侧横幅"</h3>
                                <div class="form-control">
                                    <label class="label" for="banner-l-url">
                                        <span class="label-text">"图片地址"</span>
                                    </label>
                                    <input
                                        id="banner-l-url"
                                        type="url"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| set_banner_l_url.set(event_target_value(&ev))
                                        prop:value=banner_l_url
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="banner-l-title">
                                        <span class="label-text">"标题"</span>
                                    </label>
                                    <input
                                        id="banner-l-title"
                                        type="text"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| set_banner_l_title.set(event_target_value(&ev))
                                        prop:value=banner_l_title
                                    />
                                </div>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="card-title text-base">"右侧横幅"</h3>
                                <div class="form-control">
                                    <label class="label" for="banner-r-url">
                                        <span class="label-text">"图片地址"</span>
                                    </label>
                                    <input
                                        id="banner-r-url"
                                        type="url"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| set_banner_r_url.set(event_target_value(&ev))
                                        prop:value=banner_r_url
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="banner-r-title">
                                        <span class="label-text">"标题"</span>
                                    </label>
                                    <input
                                        id="banner-r-title"
                                        type="text"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| set_banner_r_title.set(event_target_value(&ev))
                                        prop:value=banner_r_title
                                    />
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title text-base">"客服信息"</h3>
                            <div class="grid md:grid-cols-2 gap-3">
                                <div class="form-control">
                                    <label class="label" for="cs-img">
                                        <span class="label-text">"二维码图片地址"</span>
                                    </label>
                                    <input
                                        id="cs-img"
                                        type="url"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| set_cs_img.set(event_target_value(&ev))
                                        prop:value=cs_img
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="cs-qq">
                                        <span class="label-text">"客服 QQ"</span>
                                    </label>
                                    <input
                                        id="cs-qq"
                                        type="text"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| set_cs_qq.set(event_target_value(&ev))
                                        prop:value=cs_qq
                                    />
                                </div>
                            </div>
                        </div>
                    </div>

                    <div class="flex justify-end">
                        <button type="submit" class="btn btn-primary" disabled=saving>
                            <Show when=move || saving.get()>
                                <span class="loading loading-spinner loading-sm"></span>
                            </Show>
                            "保存配置"
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
