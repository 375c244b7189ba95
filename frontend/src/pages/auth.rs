//! 登录 / 注册 / 找回密码
//!
//! 必填校验交给 HTML `required`，提交前不做重复校验。
//! 找回密码分两步：先取密保问题，再提交答案和新密码。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::auth::{login, use_auth};
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use tokomo_shared::{LoginRequest, RegisterRequest, ResetPasswordRequest};

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Login,
    Register,
    Reset,
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let toast = use_toast();

    let (mode, set_mode) = signal(Mode::Login);
    let (submitting, set_submitting) = signal(false);

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (question, set_question) = signal(String::new());
    let (answer, set_answer) = signal(String::new());
    let (invite_code, set_invite_code) = signal(String::new());
    // 找回密码第二步才出现的字段；question 非空即表示进入第二步
    let (reset_question, set_reset_question) = signal(Option::<String>::None);

    let switch_mode = move |m: Mode| {
        set_mode.set(m);
        set_password.set(String::new());
        set_answer.set(String::new());
        set_reset_question.set(None);
    };

    let on_login = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        spawn_local(async move {
            let req = LoginRequest {
                username: username.get_untracked(),
                password: password.get_untracked(),
            };
            match TokomoApi::default().login(&req).await {
                Ok(r) => {
                    login(auth, r.token, r.user).await;
                    toast.success("登录成功");
                    router.navigate(AppRoute::Home);
                }
                Err(e) => toast.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    let on_register = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        spawn_local(async move {
            let invite = invite_code.get_untracked();
            let req = RegisterRequest {
                username: username.get_untracked(),
                password: password.get_untracked(),
                security_question: question.get_untracked(),
                security_answer: answer.get_untracked(),
                invite_code: (!invite.trim().is_empty()).then(|| invite.trim().to_string()),
            };
            match TokomoApi::default().register(&req).await {
                Ok(r) => {
                    login(auth, r.token, r.user).await;
                    toast.success("注册成功");
                    router.navigate(AppRoute::Home);
                }
                Err(e) => toast.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    // 找回密码第一步：取密保问题
    let on_fetch_question = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        spawn_local(async move {
            match TokomoApi::default()
                .security_question(&username.get_untracked())
                .await
            {
                Ok(r) => set_reset_question.set(Some(r.question)),
                Err(e) => toast.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    // 找回密码第二步：提交答案和新密码
    let on_reset = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        spawn_local(async move {
            let req = ResetPasswordRequest {
                username: username.get_untracked(),
                security_answer: answer.get_untracked(),
                new_password: password.get_untracked(),
            };
            match TokomoApi::default().reset_password(&req).await {
                Ok(()) => {
                    toast.success("密码已重置，请重新登录");
                    switch_mode(Mode::Login);
                }
                Err(e) => toast.error(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    let submit_button = move |label: &'static str| {
        view! {
            <button
                type="submit"
                class="btn btn-primary w-full mt-4"
                disabled=move || submitting.get()
            >
                {move || {
                    if submitting.get() {
                        view! { <span class="loading loading-spinner"></span> "请稍候..." }
                            .into_any()
                    } else {
                        label.into_any()
                    }
                }}
            </button>
        }
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold text-primary">"Tokomo"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <div class="card-body">
                        <div role="tablist" class="tabs tabs-boxed">
                            <a
                                role="tab"
                                class=move || {
                                    if mode.get() == Mode::Login { "tab tab-active" } else { "tab" }
                                }
                                on:click=move |_| switch_mode(Mode::Login)
                            >
                                "登录"
                            </a>
                            <a
                                role="tab"
                                class=move || {
                                    if mode.get() == Mode::Register {
                                        "tab tab-active"
                                    } else {
                                        "tab"
                                    }
                                }
                                on:click=move |_| switch_mode(Mode::Register)
                            >
                                "注册"
                            </a>
                            <a
                                role="tab"
                                class=move || {
                                    if mode.get() == Mode::Reset { "tab tab-active" } else { "tab" }
                                }
                                on:click=move |_| switch_mode(Mode::Reset)
                            >
                                "找回密码"
                            </a>
                        </div>

                        {move || match mode.get() {
                            Mode::Login => {
                                view! {
                                    <form class="space-y-2" on:submit=on_login>
                                        <div class="form-control">
                                            <label class="label" for="login-username">
                                                <span class="label-text">"用户名"</span>
                                            </label>
                                            <input
                                                id="login-username"
                                                type="text"
                                                required
                                                class="input input-bordered"
                                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                                prop:value=username
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label" for="login-password">
                                                <span class="label-text">"密码"</span>
                                            </label>
                                            <input
                                                id="login-password"
                                                type="password"
                                                required
                                                class="input input-bordered"
                                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                                prop:value=password
                                            />
                                        </div>
                                        {submit_button("登录")}
                                    </form>
                                }
                                    .into_any()
                            }
                            Mode::Register => {
                                view! {
                                    <form class="space-y-2" on:submit=on_register>
                                        <div class="form-control">
                                            <label class="label" for="reg-username">
                                                <span class="label-text">"用户名"</span>
                                            </label>
                                            <input
                                                id="reg-username"
                                                type="text"
                                                required
                                                class="input input-bordered"
                                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                                prop:value=username
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label" for="reg-password">
                                                <span class="label-text">"密码"</span>
                                            </label>
                                            <input
                                                id="reg-password"
                                                type="password"
                                                required
                                                minlength="6"
                                                class="input input-bordered"
                                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                                prop:value=password
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label" for="reg-question">
                                                <span class="label-text">"密保问题"</span>
                                            </label>
                                            <input
                                                id="reg-question"
                                                type="text"
                                                required
                                                placeholder="忘记密码时用于找回"
                                                class="input input-bordered"
                                                on:input=move |ev| set_question.set(event_target_value(&ev))
                                                prop:value=question
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label" for="reg-answer">
                                                <span class="label-text">"密保答案"</span>
                                            </label>
                                            <input
                                                id="reg-answer"
                                                type="text"
                                                required
                                                class="input input-bordered"
                                                on:input=move |ev| set_answer.set(event_target_value(&ev))
                                                prop:value=answer
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label" for="reg-invite">
                                                <span class="label-text">"邀请码 (可选)"</span>
                                            </label>
                                            <input
                                                id="reg-invite"
                                                type="text"
                                                class="input input-bordered font-mono"
                                                on:input=move |ev| set_invite_code.set(event_target_value(&ev))
                                                prop:value=invite_code
                                            />
                                        </div>
                                        {submit_button("注册")}
                                    </form>
                                }
                                    .into_any()
                            }
                            Mode::Reset => {
                                match reset_question.get() {
                                    None => {
                                        view! {
                                            <form class="space-y-2" on:submit=on_fetch_question>
                                                <div class="form-control">
                                                    <label class="label" for="reset-username">
                                                        <span class="label-text">"用户名"</span>
                                                    </label>
                                                    <input
                                                        id="reset-username"
                                                        type="text"
                                                        required
                                                        class="input input-bordered"
                                                        on:input=move |ev| set_username.set(event_target_value(&ev))
                                                        prop:value=username
                                                    />
                                                </div>
                                                {submit_button("获取密保问题")}
                                            </form>
                                        }
                                            .into_any()
                                    }
                                    Some(q) => {
                                        view! {
                                            <form class="space-y-2" on:submit=on_reset>
                                                <div class="alert alert-info text-sm">
                                                    <span>"密保问题: " {q}</span>
                                                </div>
                                                <div class="form-control">
                                                    <label class="label" for="reset-answer">
                                                        <span class="label-text">"密保答案"</span>
                                                    </label>
                                                    <input
                                                        id="reset-answer"
                                                        type="text"
                                                        required
                                                        class="input input-bordered"
                                                        on:input=move |ev| set_answer.set(event_target_value(&ev))
                                                        prop:value=answer
                                                    />
                                                </div>
                                                <div class="form-control">
                                                    <label class="label" for="reset-password">
                                                        <span class="label-text">"新密码"</span>
                                                    </label>
                                                    <input
                                                        id="reset-password"
                                                        type="password"
                                                        required
                                                        minlength="6"
                                                        class="input input-bordered"
                                                        on:input=move |ev| set_password.set(event_target_value(&ev))
                                                        prop:value=password
                                                    />
                                                </div>
                                                {submit_button("重置密码")}
                                            </form>
                                        }
                                            .into_any()
                                    }
                                }
                            }
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}
