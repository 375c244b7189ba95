//! 前台布局：顶栏 + 内容 + 页脚，不做任何访问控制

use leptos::prelude::*;

use crate::components::footer::Footer;
use crate::components::navbar::Navbar;

#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <Navbar />
            <main class="flex-1 w-full max-w-6xl mx-auto p-4 md:p-6">{children()}</main>
            <Footer />
        </div>
    }
}
