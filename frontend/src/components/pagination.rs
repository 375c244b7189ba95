//! 分页组件
//!
//! 统一的有界翻页条：第一页禁用上一页，最后一页禁用下一页。

use leptos::prelude::*;

/// 把目标页码收敛到 `[1, total_pages]`
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.max(1).min(total_pages.max(1))
}

#[component]
pub fn Pager(
    /// 当前页（从 1 开始）
    #[prop(into)]
    page: Signal<u32>,
    /// 总页数（至少 1）
    #[prop(into)]
    total_pages: Signal<u32>,
    /// 翻页回调，参数为已收敛的目标页码
    #[prop(into)]
    on_page: Callback<u32>,
) -> impl IntoView {
    let prev_disabled = move || page.get() <= 1;
    let next_disabled = move || page.get() >= total_pages.get().max(1);

    view! {
        <div class="join justify-center">
            <button
                class="join-item btn btn-sm"
                disabled=prev_disabled
                on:click=move |_| {
                    on_page.run(clamp_page(page.get().saturating_sub(1), total_pages.get()));
                }
            >
                "«"
            </button>
            <button class="join-item btn btn-sm btn-disabled">
                {move || format!("{} / {}", page.get(), total_pages.get().max(1))}
            </button>
            <button
                class="join-item btn btn-sm"
                disabled=next_disabled
                on:click=move |_| {
                    on_page.run(clamp_page(page.get() + 1, total_pages.get()));
                }
            >
                "»"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_valid_range() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(9, 5), 5);
    }

    #[test]
    fn empty_list_still_has_one_page() {
        assert_eq!(clamp_page(1, 0), 1);
        assert_eq!(clamp_page(7, 0), 1);
    }
}
