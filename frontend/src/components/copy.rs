//! 剪贴板模块
//!
//! 下载地址、解压密码、批量生成的码都靠它复制。

use leptos::prelude::*;

use crate::components::toast::use_toast;

/// 写入系统剪贴板
///
/// `write_text` 返回的 Promise 不需要等待，写入照常进行；
/// 仅在拿不到 window 时返回 false。
pub fn copy_to_clipboard(text: &str) -> bool {
    match web_sys::window() {
        Some(window) => {
            let _ = window.navigator().clipboard().write_text(text);
            true
        }
        None => false,
    }
}

/// 复制按钮：点击复制并弹出提示
#[component]
pub fn CopyButton(
    /// 要复制的内容
    #[prop(into)]
    text: Signal<String>,
    /// 按钮文案，默认“复制”
    #[prop(optional)]
    label: Option<&'static str>,
) -> impl IntoView {
    let toast = use_toast();
    let label = label.unwrap_or("复制");

    view! {
        <button
            type="button"
            class="btn btn-ghost btn-xs"
            on:click=move |_| {
                if copy_to_clipboard(&text.get()) {
                    toast.success("已复制到剪贴板");
                } else {
                    toast.error("复制失败");
                }
            }
        >
            {label}
        </button>
    }
}
