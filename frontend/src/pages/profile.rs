//! 个人中心：账号信息、积分兑换码、VIP 码

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::auth::{refresh_user, use_auth};
use crate::components::toast::use_toast;
use tokomo_shared::date;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let user = auth.user_signal();

    let (redeem_code, set_redeem_code) = signal(String::new());
    let (vip_code, set_vip_code) = signal(String::new());
    let (redeeming, set_redeeming) = signal(false);

    let on_redeem = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let code = redeem_code.get().trim().to_string();
        if code.is_empty() {
            return;
        }
        set_redeeming.set(true);
        spawn_local(async move {
            match TokomoApi::default().use_redeem_code(&code).await {
                Ok(r) => {
                    toast.success(format!("兑换成功，获得 {} 积分", r.points));
                    set_redeem_code.set(String::new());
                    refresh_user(auth);
                }
                // 服务端消息原样透出（如“兑换码已被使用”）
                Err(e) => toast.error(e.to_string()),
            }
            set_redeeming.set(false);
        });
    };

    let on_vip = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let code = vip_code.get().trim().to_string();
        if code.is_empty() {
            return;
        }
        set_redeeming.set(true);
        spawn_local(async move {
            match TokomoApi::default().use_vip_code(&code).await {
                Ok(r) => {
                    match r.vip_expire_date {
                        Some(expire) => toast.success(format!(
                            "VIP 延长 {} 天，有效期至 {}",
                            r.days,
                            date::format_date(&expire)
                        )),
                        None => toast.success(format!("VIP 延长 {} 天", r.days)),
                    }
                    set_vip_code.set(String::new());
                    refresh_user(auth);
                }
                Err(e) => toast.error(e.to_string()),
            }
            set_redeeming.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-4">
            <h2 class="text-2xl font-bold">"个人中心"</h2>

            {move || {
                user.get()
                    .map(|u| {
                        let vip = u
                            .vip_expire_date
                            .as_deref()
                            .map(date::format_date)
                            .unwrap_or_else(|| "未开通".to_string());
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <div class="flex items-center justify-between">
                                        <h3 class="card-title">{u.username.clone()}</h3>
                                        <Show when={
                                            let admin = u.is_admin();
                                            move || admin
                                        }>
                                            <span class="badge badge-secondary">"管理员"</span>
                                        </Show>
                                    </div>
                                    <div class="stats stats-vertical md:stats-horizontal">
                                        <div class="stat">
                                            <div class="stat-title">"积分"</div>
                                            <div class="stat-value text-primary">{u.points}</div>
                                        </div>
                                        <div class="stat">
                                            <div class="stat-title">"VIP 有效期"</div>
                                            <div class="stat-value text-secondary text-2xl">{vip}</div>
                                        </div>
                                    </div>
                                </div>
                            </div>
                        }
                    })
            }}

            // 积分兑换
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"积分兑换"</h3>
                    <form class="join" on:submit=on_redeem>
                        <input
                            type="text"
                            required
                            placeholder="输入兑换码"
                            class="input input-bordered join-item w-full font-mono"
                            on:input=move |ev| set_redeem_code.set(event_target_value(&ev))
                            prop:value=redeem_code
                        />
                        <button
                            type="submit"
                            class="btn btn-primary join-item"
                            disabled=move || redeeming.get()
                        >
                            "兑换"
                        </button>
                    </form>
                </div>
            </div>

            // VIP 兑换
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"VIP 兑换"</h3>
                    <p class="text-sm text-base-content/60">
                        "VIP 期间可直接查看全部游戏的下载信息"
                    </p>
                    <form class="join" on:submit=on_vip>
                        <input
                            type="text"
                            required
                            placeholder="输入 VIP 码"
                            class="input input-bordered join-item w-full font-mono"
                            on:input=move |ev| set_vip_code.set(event_target_value(&ev))
                            prop:value=vip_code
                        />
                        <button
                            type="submit"
                            class="btn btn-secondary join-item"
                            disabled=move || redeeming.get()
                        >
                            "兑换"
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
