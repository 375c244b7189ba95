//! 轮播图组件
//!
//! 图片来自站点配置，4 秒自动切换，支持手动切换和指示点。

use leptos::prelude::*;

use crate::web::Interval;
use tokomo_shared::ImageConfig;

const AUTO_ADVANCE_MS: u32 = 4000;

#[component]
pub fn Carousel(
    /// 轮播图片列表（可为空，渲染占位）
    #[prop(into)]
    slides: Signal<Vec<ImageConfig>>,
) -> impl IntoView {
    let (index, set_index) = signal(0usize);

    let advance = move |step: isize| {
        let len = slides.get_untracked().len();
        if len == 0 {
            return;
        }
        set_index.update(|i| {
            *i = (*i as isize + step).rem_euclid(len as isize) as usize;
        });
    };

    // Interval 持有 !Send 的 wasm 闭包，只能放本线程存储，随组件销毁清除
    let interval = StoredValue::new_local(Some(Interval::new(AUTO_ADVANCE_MS, move || advance(1))));
    on_cleanup(move || interval.set_value(None));

    // 配置热更新后索引可能越界，拉回范围内
    Effect::new(move |_| {
        let len = slides.get().len();
        if len > 0 && index.get_untracked() >= len {
            set_index.set(0);
        }
    });

    view! {
        <div class="relative w-full h-64 md:h-80 rounded-box overflow-hidden bg-base-300">
            <Show
                when=move || !slides.get().is_empty()
                fallback=|| {
                    view! {
                        <div class="flex items-center justify-center h-full text-base-content/40">
                            "暂无轮播内容"
                        </div>
                    }
                }
            >
                {move || {
                    let list = slides.get();
                    let i = index.get().min(list.len().saturating_sub(1));
                    let slide = list[i].clone();
                    view! {
                        <img
                            src=slide.url.clone()
                            alt=slide.title.clone()
                            class="w-full h-full object-cover"
                        />
                        <div class="absolute bottom-0 inset-x-0 bg-gradient-to-t from-black/60 to-transparent p-4">
                            <span class="text-white font-bold">{slide.title}</span>
                        </div>
                    }
                }}

                <button
                    class="btn btn-circle btn-sm absolute left-2 top-1/2 -translate-y-1/2"
                    on:click=move |_| advance(-1)
                >
                    "❮"
                </button>
                <button
                    class="btn btn-circle btn-sm absolute right-2 top-1/2 -translate-y-1/2"
                    on:click=move |_| advance(1)
                >
                    "❯"
                </button>

                // 指示点
                <div class="absolute bottom-2 inset-x-0 flex justify-center gap-2">
                    <For
                        each={move || (0..slides.get().len()).collect::<Vec<_>>()}
                        key=|i| *i
                        children=move |i| {
                            view! {
                                <button
                                    class=move || {
                                        if index.get() == i {
                                            "w-2 h-2 rounded-full bg-white"
                                        } else {
                                            "w-2 h-2 rounded-full bg-white/40"
                                        }
                                    }
                                    on:click=move |_| set_index.set(i)
                                ></button>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
