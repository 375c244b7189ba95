//! 用户管理
//!
//! 列表 + 搜索；详情、编辑（积分/VIP/权限）、重置密码、删除。
//! 每次变更成功后重新拉取列表，不在本地推算状态。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::pagination::Pager;
use crate::components::toast::use_toast;
use crate::web::RequestSeq;
use tokomo_shared::{AdminResetPasswordRequest, Pagination, UpdateUserRequest, User, date};

const PAGE_SIZE: u32 = 10;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let toast = use_toast();

    let (users, set_users) = signal(Vec::<User>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (page, set_page) = signal(1u32);
    let (search, set_search) = signal(String::new());
    // 已提交生效的搜索词（区别于输入框内容）
    let (active_search, set_active_search) = signal(String::new());

    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move || {
            let ticket = seq.issue();
            let seq = seq.clone();
            let page = page.get_untracked();
            let q = active_search.get_untracked();
            set_loading.set(true);
            spawn_local(async move {
                let search = (!q.is_empty()).then_some(q.as_str());
                let result = TokomoApi::default().list_users(page, PAGE_SIZE, search).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(r) => {
                        set_users.set(r.users);
                        set_pagination.set(r.pagination);
                    }
                    Err(e) => toast.error(format!("加载用户列表失败: {e}")),
                }
                set_loading.set(false);
            });
        }
    };

    {
        let load = load.clone();
        Effect::new(move |_| {
            let _ = page.get();
            let _ = active_search.get();
            load();
        });
    }

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_page.set(1);
        set_active_search.set(search.get().trim().to_string());
    };

    // ---------- 详情对话框 ----------
    let (detail, set_detail) = signal(Option::<User>::None);
    let detail_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = detail_ref.get() {
            if detail.get().is_some() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let open_detail = move |id: i64| {
        spawn_local(async move {
            match TokomoApi::default().get_user(id).await {
                Ok(u) => set_detail.set(Some(u)),
                Err(e) => toast.error(format!("加载用户详情失败: {e}")),
            }
        });
    };

    // ---------- 编辑对话框 ----------
    let (editing, set_editing) = signal(Option::<i64>::None);
    let (edit_points, set_edit_points) = signal(String::new());
    let (edit_vip, set_edit_vip) = signal(String::new());
    let (edit_admin, set_edit_admin) = signal(false);
    let (edit_active, set_edit_active) = signal(true);
    let edit_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = edit_ref.get() {
            if editing.get().is_some() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let open_edit = move |u: &User| {
        set_edit_points.set(u.points.to_string());
        set_edit_vip.set(
            u.vip_expire_date
                .as_deref()
                .map(date::format_date)
                .unwrap_or_default(),
        );
        set_edit_admin.set(u.is_admin());
        set_edit_active.set(u.is_active());
        set_editing.set(Some(u.id));
    };

    let on_edit_submit = {
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(id) = editing.get_untracked() else {
                return;
            };
            let load = load.clone();
            let vip = edit_vip.get_untracked().trim().to_string();
            let req = UpdateUserRequest {
                points: edit_points.get_untracked().trim().parse().ok(),
                vip_expire_date: (!vip.is_empty()).then_some(vip),
                is_admin: edit_admin.get_untracked(),
                is_active: edit_active.get_untracked(),
            };
            spawn_local(async move {
                match TokomoApi::default().update_user(id, &req).await {
                    Ok(()) => {
                        toast.success("用户已更新");
                        set_editing.set(None);
                        load();
                    }
                    Err(e) => toast.error(format!("更新用户失败: {e}")),
                }
            });
        }
    };

    // ---------- 重置密码对话框 ----------
    let (resetting, set_resetting) = signal(Option::<i64>::None);
    let (new_password, set_new_password) = signal(String::new());
    let reset_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = reset_ref.get() {
            if resetting.get().is_some() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_reset_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = resetting.get_untracked() else {
            return;
        };
        let req = AdminResetPasswordRequest {
            new_password: new_password.get_untracked(),
        };
        spawn_local(async move {
            match TokomoApi::default().admin_reset_password(id, &req).await {
                Ok(()) => {
                    toast.success("密码已重置");
                    set_resetting.set(None);
                    set_new_password.set(String::new());
                }
                Err(e) => toast.error(format!("重置密码失败: {e}")),
            }
        });
    };

    let on_delete = {
        let load = load.clone();
        move |id: i64, username: String| {
            if !confirm(&format!("确定删除用户 {username} 吗？")) {
                return;
            }
            let load = load.clone();
            spawn_local(async move {
                match TokomoApi::default().delete_user(id).await {
                    Ok(()) => {
                        toast.success("用户已删除");
                        load();
                    }
                    Err(e) => toast.error(format!("删除用户失败: {e}")),
                }
            });
        }
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"用户管理"</h2>
                <form class="join" on:submit=on_search>
                    <input
                        type="text"
                        placeholder="搜索用户名"
                        class="input input-bordered input-sm join-item"
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        prop:value=search
                    />
                    <button type="submit" class="btn btn-sm btn-primary join-item">
                        "搜索"
                    </button>
                </form>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"用户名"</th>
                                <th>"积分"</th>
                                <th>"VIP 到期"</th>
                                <th>"状态"</th>
                                <th>"注册时间"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get()>
                                <tr>
                                    <td colspan="6" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || users.get()
                                key=|u| u.id
                                children=move |u| {
                                    let id = u.id;
                                    let username = u.username.clone();
                                    let username_del = u.username.clone();
                                    let vip = u
                                        .vip_expire_date
                                        .as_deref()
                                        .map(date::format_date)
                                        .unwrap_or_else(|| "-".to_string());
                                    let created = date::format_date(&u.created_at);
                                    let is_admin = u.is_admin();
                                    let is_active = u.is_active();
                                    let edit_user = u.clone();
                                    let on_delete = on_delete.clone();
                                    view! {
                                        <tr>
                                            <td class="font-bold">
                                                {username}
                                                <Show when=move || is_admin>
                                                    <span class="badge badge-secondary badge-sm ml-2">
                                                        "管理员"
                                                    </span>
                                                </Show>
                                            </td>
                                            <td>{u.points}</td>
                                            <td>{vip}</td>
                                            <td>
                                                {if is_active {
                                                    view! {
                                                        <span class="badge badge-success badge-outline">
                                                            "正常"
                                                        </span>
                                                    }
                                                        .into_any()
                                                } else {
                                                    view! {
                                                        <span class="badge badge-error badge-outline">
                                                            "禁用"
                                                        </span>
                                                    }
                                                        .into_any()
                                                }}
                                            </td>
                                            <td class="text-sm opacity-70">{created}</td>
                                            <td class="space-x-1 whitespace-nowrap">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| open_detail(id)
                                                >
                                                    "详情"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| open_edit(&edit_user)
                                                >
                                                    "编辑"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| set_resetting.set(Some(id))
                                                >
                                                    "重置密码"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    on:click=move |_| on_delete(id, username_del.clone())
                                                >
                                                    "删除"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>

            <Pager
                page=page
                total_pages=Signal::derive(move || pagination.get().total_pages)
                on_page=Callback::new(move |p: u32| set_page.set(p))
            />

            // 详情对话框
            <dialog class="modal" node_ref=detail_ref on:close=move |_| set_detail.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"用户详情"</h3>
                    {move || {
                        detail
                            .get()
                            .map(|u| {
                                let vip = u
                                    .vip_expire_date
                                    .as_deref()
                                    .map(date::format_datetime)
                                    .unwrap_or_else(|| "-".to_string());
                                let last_login = u
                                    .last_login_at
                                    .as_deref()
                                    .map(date::format_datetime)
                                    .unwrap_or_else(|| "-".to_string());
                                view! {
                                    <div class="py-2 space-y-1 text-sm">
                                        <p>"用户名: " {u.username.clone()}</p>
                                        <p>"积分: " {u.points}</p>
                                        <p>"VIP 到期: " {vip}</p>
                                        <p>"最后登录: " {last_login}</p>
                                        <p>
                                            "密保问题: "
                                            {u.security_question.clone().unwrap_or_else(|| "-".to_string())}
                                        </p>
                                        <p>"注册时间: " {date::format_datetime(&u.created_at)}</p>
                                    </div>
                                }
                            })
                    }}
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| set_detail.set(None)>
                            "关闭"
                        </button>
                    </div>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>

            // 编辑对话框
            <dialog class="modal" node_ref=edit_ref on:close=move |_| set_editing.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"编辑用户"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_edit_submit>
                        <div class="form-control">
                            <label class="label" for="edit-points">
                                <span class="label-text">"积分"</span>
                            </label>
                            <input
                                id="edit-points"
                                type="number"
                                required
                                class="input input-bordered"
                                on:input=move |ev| set_edit_points.set(event_target_value(&ev))
                                prop:value=edit_points
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="edit-vip">
                                <span class="label-text">"VIP 到期日 (YYYY-MM-DD，留空清除)"</span>
                            </label>
                            <input
                                id="edit-vip"
                                type="date"
                                class="input input-bordered"
                                on:input=move |ev| set_edit_vip.set(event_target_value(&ev))
                                prop:value=edit_vip
                            />
                        </div>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"管理员"</span>
                                <input
                                    type="checkbox"
                                    class="toggle toggle-secondary"
                                    prop:checked=edit_admin
                                    on:change=move |ev| set_edit_admin.set(event_target_checked(&ev))
                                />
                            </label>
                        </div>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"账号启用"</span>
                                <input
                                    type="checkbox"
                                    class="toggle toggle-primary"
                                    prop:checked=edit_active
                                    on:change=move |ev| set_edit_active.set(event_target_checked(&ev))
                                />
                            </label>
                        </div>
                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_editing.set(None)
                            >
                                "取消"
                            </button>
                            <button type="submit" class="btn btn-primary">
                                "保存"
                            </button>
                        </div>
                    </form>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>

            // 重置密码对话框
            <dialog class="modal" node_ref=reset_ref on:close=move |_| set_resetting.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"重置密码"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_reset_submit>
                        <div class="form-control">
                            <label class="label" for="reset-new-password">
                                <span class="label-text">"新密码 (至少 6 位)"</span>
                            </label>
                            <input
                                id="reset-new-password"
                                type="password"
                                required
                                minlength="6"
                                class="input input-bordered"
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                                prop:value=new_password
                            />
                        </div>
                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_resetting.set(None)
                            >
                                "取消"
                            </button>
                            <button type="submit" class="btn btn-primary">
                                "确认重置"
                            </button>
                        </div>
                    </form>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>
        </div>
    }
}
