//! 前台页脚

use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-6 bg-base-300 text-base-content mt-auto">
            <aside>
                <p class="font-bold">"Tokomo 游戏小铺"</p>
                <p class="text-sm opacity-70">"资源仅供学习交流，请于下载后 24 小时内删除"</p>
            </aside>
        </footer>
    }
}
