//! 群组管理
//!
//! 群组 CRUD、成员查看与增删、兑换统计（可选日期范围）。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::pagination::Pager;
use crate::components::toast::use_toast;
use crate::web::RequestSeq;
use tokomo_shared::{
    CreateGroupRequest, Group, GroupDetail, GroupStatistics, Pagination, UpdateGroupRequest, date,
};

const PAGE_SIZE: u32 = 10;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

#[derive(Clone, Copy, PartialEq)]
enum Editor {
    Closed,
    Create,
    Edit(i64),
}

#[component]
pub fn AdminGroupsPage() -> impl IntoView {
    let toast = use_toast();

    let (groups, set_groups) = signal(Vec::<Group>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (page, set_page) = signal(1u32);

    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move || {
            let ticket = seq.issue();
            let seq = seq.clone();
            let page = page.get_untracked();
            set_loading.set(true);
            spawn_local(async move {
                let result = TokomoApi::default().list_groups(page, PAGE_SIZE).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(r) => {
                        set_groups.set(r.groups);
                        set_pagination.set(r.pagination);
                    }
                    Err(e) => toast.error(format!("加载群组失败: {e}")),
                }
                set_loading.set(false);
            });
        }
    };

    {
        let load = load.clone();
        Effect::new(move |_| {
            let _ = page.get();
            load();
        });
    }

    // ---------- 新建 / 编辑对话框 ----------
    let (editor, set_editor) = signal(Editor::Closed);
    let (f_name, set_f_name) = signal(String::new());
    let (f_invite, set_f_invite) = signal(String::new());
    let (f_points, set_f_points) = signal("0".to_string());
    let (f_note, set_f_note) = signal(String::new());
    let editor_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = editor_ref.get() {
            if editor.get() != Editor::Closed {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let open_create = move |_| {
        set_f_name.set(String::new());
        set_f_invite.set(String::new());
        set_f_points.set("0".to_string());
        set_f_note.set(String::new());
        set_editor.set(Editor::Create);
    };

    let open_edit = move |g: &Group| {
        set_f_name.set(g.name.clone());
        set_f_invite.set(g.invite_code.clone());
        set_f_points.set(g.reward_points.to_string());
        set_f_note.set(g.note.clone().unwrap_or_default());
        set_editor.set(Editor::Edit(g.id));
    };

    let on_submit = {
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let mode = editor.get_untracked();
            let load = load.clone();
            let invite = f_invite.get_untracked().trim().to_string();
            let note = f_note.get_untracked().trim().to_string();
            let name = f_name.get_untracked().trim().to_string();
            let reward_points = f_points.get_untracked().trim().parse().unwrap_or(0);
            spawn_local(async move {
                let api = TokomoApi::default();
                let result = match mode {
                    Editor::Create => {
                        api.create_group(&CreateGroupRequest {
                            name,
                            invite_code: (!invite.is_empty()).then_some(invite),
                            reward_points,
                            note: (!note.is_empty()).then_some(note),
                        })
                        .await
                    }
                    Editor::Edit(id) => {
                        api.update_group(
                            id,
                            &UpdateGroupRequest {
                                name: Some(name),
                                invite_code: (!invite.is_empty()).then_some(invite),
                                reward_points,
                                note: (!note.is_empty()).then_some(note),
                            },
                        )
                        .await
                    }
                    Editor::Closed => return,
                };
                match result {
                    Ok(()) => {
                        toast.success(if mode == Editor::Create {
                            "群组已创建"
                        } else {
                            "群组已更新"
                        });
                        set_editor.set(Editor::Closed);
                        load();
                    }
                    Err(e) => toast.error(format!("保存群组失败: {e}")),
                }
            });
        }
    };

    let on_delete = {
        let load = load.clone();
        move |id: i64, name: String| {
            if !confirm(&format!("确定删除群组 {name} 吗？")) {
                return;
            }
            let load = load.clone();
            spawn_local(async move {
                match TokomoApi::default().delete_group(id).await {
                    Ok(()) => {
                        toast.success("群组已删除");
                        load();
                    }
                    Err(e) => toast.error(format!("删除群组失败: {e}")),
                }
            });
        }
    };

    // ---------- 详情（成员）对话框 ----------
    let (detail, set_detail) = signal(Option::<GroupDetail>::None);
    let (add_member_id, set_add_member_id) = signal(String::new());
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
            match TokomoApi::default().get_group(id).await {
                Ok(d) => set_detail.set(Some(d)),
                Err(e) => toast.error(format!("加载群组详情失败: {e}")),
            }
        });
    };

    let on_add_member = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(group_id) = detail.get_untracked().map(|d| d.group.id) else {
            return;
        };
        let Ok(user_id) = add_member_id.get_untracked().trim().parse::<i64>() else {
            toast.error("请输入有效的用户 ID");
            return;
        };
        spawn_local(async move {
            match TokomoApi::default().add_group_member(group_id, user_id).await {
                Ok(()) => {
                    toast.success("成员已添加");
                    set_add_member_id.set(String::new());
                    open_detail(group_id);
                }
                Err(e) => toast.error(format!("添加成员失败: {e}")),
            }
        });
    };

    let on_remove_member = move |group_id: i64, user_id: i64, username: String| {
        if !confirm(&format!("确定移除成员 {username} 吗？")) {
            return;
        }
        spawn_local(async move {
            match TokomoApi::default()
                .remove_group_member(group_id, user_id)
                .await
            {
                Ok(()) => {
                    toast.success("成员已移除");
                    open_detail(group_id);
                }
                Err(e) => toast.error(format!("移除成员失败: {e}")),
            }
        });
    };

    // ---------- 统计对话框 ----------
    let (stats_group, set_stats_group) = signal(Option::<i64>::None);
    let (stats, set_stats) = signal(Option::<GroupStatistics>::None);
    let (stats_start, set_stats_start) = signal(String::new());
    let (stats_end, set_stats_end) = signal(String::new());
    let stats_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = stats_ref.get() {
            if stats_group.get().is_some() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let load_stats = move || {
        let Some(id) = stats_group.get_untracked() else {
            return;
        };
        let start = stats_start.get_untracked();
        let end = stats_end.get_untracked();
        spawn_local(async move {
            let start = (!start.is_empty()).then_some(start);
            let end = (!end.is_empty()).then_some(end);
            match TokomoApi::default()
                .group_statistics(id, start.as_deref(), end.as_deref())
                .await
            {
                Ok(s) => set_stats.set(Some(s)),
                Err(e) => toast.error(format!("加载统计失败: {e}")),
            }
        });
    };

    let open_stats = move |id: i64| {
        set_stats.set(None);
        set_stats_start.set(String::new());
        set_stats_end.set(String::new());
        set_stats_group.set(Some(id));
        load_stats();
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"群组管理"</h2>
                <button class="btn btn-sm btn-primary" on:click=open_create>
                    "新建群组"
                </button>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"名称"</th>
                                <th>"邀请码"</th>
                                <th>"奖励积分"</th>
                                <th>"成员数"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get()>
                                <tr>
                                    <td colspan="5" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || groups.get()
                                key=|g| g.id
                                children=move |g| {
                                    let id = g.id;
                                    let name = g.name.clone();
                                    let name_del = g.name.clone();
                                    let invite = g.invite_code.clone();
                                    let members = g.member_count.unwrap_or(0);
                                    let edit_group = g.clone();
                                    let on_delete = on_delete.clone();
                                    view! {
                                        <tr>
                                            <td class="font-bold">{name}</td>
                                            <td class="font-mono">{invite}</td>
                                            <td>{g.reward_points}</td>
                                            <td>{members}</td>
                                            <td class="space-x-1 whitespace-nowrap">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| open_detail(id)
                                                >
                                                    "成员"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| open_stats(id)
                                                >
                                                    "统计"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| open_edit(&edit_group)
                                                >
                                                    "编辑"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    on:click=move |_| on_delete(id, name_del.clone())
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

            // 新建 / 编辑对话框
            <dialog class="modal" node_ref=editor_ref on:close=move |_| set_editor.set(Editor::Closed)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        {move || {
                            if editor.get() == Editor::Create { "新建群组" } else { "编辑群组" }
                        }}
                    </h3>
                    <form class="space-y-3 mt-2" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="grp-name">
                                <span class="label-text">"群组名称"</span>
                            </label>
                            <input
                                id="grp-name"
                                type="text"
                                required
                                class="input input-bordered"
                                on:input=move |ev| set_f_name.set(event_target_value(&ev))
                                prop:value=f_name
                            />
                        </div>
                        <div class="grid grid-cols-2 gap-3">
                            <div class="form-control">
                                <label class="label" for="grp-invite">
                                    <span class="label-text">"邀请码 (留空自动生成)"</span>
                                </label>
                                <input
                                    id="grp-invite"
                                    type="text"
                                    class="input input-bordered font-mono"
                                    on:input=move |ev| set_f_invite.set(event_target_value(&ev))
                                    prop:value=f_invite
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="grp-points">
                                    <span class="label-text">"邀请奖励积分"</span>
                                </label>
                                <input
                                    id="grp-points"
                                    type="number"
                                    min="0"
                                    required
                                    class="input input-bordered"
                                    on:input=move |ev| set_f_points.set(event_target_value(&ev))
                                    prop:value=f_points
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label" for="grp-note">
                                <span class="label-text">"备注"</span>
                            </label>
                            <textarea
                                id="grp-note"
                                class="textarea textarea-bordered"
                                on:input=move |ev| set_f_note.set(event_target_value(&ev))
                                prop:value=f_note
                            ></textarea>
                        </div>
                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_editor.set(Editor::Closed)
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

            // 详情（成员）对话框
            <dialog class="modal" node_ref=detail_ref on:close=move |_| set_detail.set(None)>
                <div class="modal-box max-w-2xl">
                    <h3 class="font-bold text-lg">
                        {move || {
                            detail
                                .get()
                                .map(|d| format!("群组成员 - {}", d.group.name))
                                .unwrap_or_default()
                        }}
                    </h3>
                    <form class="join mt-2" on:submit=on_add_member>
                        <input
                            type="number"
                            required
                            placeholder="用户 ID"
                            class="input input-bordered input-sm join-item"
                            on:input=move |ev| set_add_member_id.set(event_target_value(&ev))
                            prop:value=add_member_id
                        />
                        <button type="submit" class="btn btn-sm btn-primary join-item">
                            "添加成员"
                        </button>
                    </form>
                    <div class="overflow-x-auto mt-2">
                        <table class="table table-sm">
                            <thead>
                                <tr>
                                    <th>"用户 ID"</th>
                                    <th>"用户名"</th>
                                    <th>"加入时间"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    detail
                                        .get()
                                        .map(|d| {
                                            let group_id = d.group.id;
                                            d.members
                                                .into_iter()
                                                .map(|m| {
                                                    let username = m.username.clone();
                                                    let joined = date::format_date(&m.joined_at);
                                                    view! {
                                                        <tr>
                                                            <td>{m.user_id}</td>
                                                            <td>{m.username.clone()}</td>
                                                            <td class="text-sm opacity-70">{joined}</td>
                                                            <td>
                                                                <button
                                                                    class="btn btn-ghost btn-xs text-error"
                                                                    on:click=move |_| {
                                                                        on_remove_member(group_id, m.user_id, username.clone())
                                                                    }
                                                                >
                                                                    "移除"
                                                                </button>
                                                            </td>
                                                        </tr>
                                                    }
                                                })
                                                .collect::<Vec<_>>()
                                        })
                                }}
                            </tbody>
                        </table>
                    </div>
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

            // 统计对话框
            <dialog class="modal" node_ref=stats_ref on:close=move |_| set_stats_group.set(None)>
                <div class="modal-box max-w-2xl">
                    <h3 class="font-bold text-lg">"兑换统计"</h3>
                    <div class="flex items-end gap-2 mt-2">
                        <div class="form-control">
                            <label class="label" for="stats-start">
                                <span class="label-text">"开始日期"</span>
                            </label>
                            <input
                                id="stats-start"
                                type="date"
                                class="input input-bordered input-sm"
                                on:input=move |ev| set_stats_start.set(event_target_value(&ev))
                                prop:value=stats_start
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="stats-end">
                                <span class="label-text">"结束日期"</span>
                            </label>
                            <input
                                id="stats-end"
                                type="date"
                                class="input input-bordered input-sm"
                                on:input=move |ev| set_stats_end.set(event_target_value(&ev))
                                prop:value=stats_end
                            />
                        </div>
                        <button class="btn btn-sm btn-primary" on:click=move |_| load_stats()>
                            "查询"
                        </button>
                    </div>
                    {move || {
                        stats
                            .get()
                            .map(|s| {
                                view! {
                                    <div class="mt-3 space-y-2">
                                        <div class="stats shadow w-full">
                                            <div class="stat py-2">
                                                <div class="stat-title">"已用兑换码"</div>
                                                <div class="stat-value text-2xl">
                                                    {s.total_codes_used}
                                                </div>
                                            </div>
                                            <div class="stat py-2">
                                                <div class="stat-title">"发放积分"</div>
                                                <div class="stat-value text-2xl text-primary">
                                                    {s.total_points_rewarded}
                                                </div>
                                            </div>
                                        </div>
                                        <div class="overflow-x-auto max-h-60 overflow-y-auto">
                                            <table class="table table-sm">
                                                <thead>
                                                    <tr>
                                                        <th>"兑换码"</th>
                                                        <th>"积分"</th>
                                                        <th>"使用者"</th>
                                                        <th>"时间"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {s
                                                        .codes
                                                        .iter()
                                                        .map(|c| {
                                                            view! {
                                                                <tr>
                                                                    <td class="font-mono">{c.code.clone()}</td>
                                                                    <td>{c.points}</td>
                                                                    <td>{c.username.clone()}</td>
                                                                    <td class="text-sm opacity-70">
                                                                        {date::format_datetime(&c.used_at)}
                                                                    </td>
                                                                </tr>
                                                            }
                                                        })
                                                        .collect::<Vec<_>>()}
                                                </tbody>
                                            </table>
                                        </div>
                                    </div>
                                }
                            })
                    }}
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| set_stats_group.set(None)>
                            "关闭"
                        </button>
                    </div>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>
        </div>
    }
}
