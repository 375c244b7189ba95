//! VIP 码管理
//!
//! 与兑换码同构，多一个可选的群组绑定；批量生成完毕弹出结果
//! 对话框，生成的码可一键全部复制。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::copy::copy_to_clipboard;
use crate::components::pagination::Pager;
use crate::components::toast::use_toast;
use crate::web::RequestSeq;
use tokomo_shared::{
    BatchVipCodeRequest, CreateVipCodeRequest, Group, Pagination, UpdateVipCodeRequest, VipCode,
    date,
};

const PAGE_SIZE: u32 = 10;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

fn parse_tri(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

#[component]
pub fn AdminVipCodesPage() -> impl IntoView {
    let toast = use_toast();

    let (codes, set_codes) = signal(Vec::<VipCode>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (page, set_page) = signal(1u32);
    let (filter_used, set_filter_used) = signal(Option::<bool>::None);
    // 群组下拉选项（创建/批量共用）
    let (groups, set_groups) = signal(Vec::<Group>::new());

    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move || {
            let ticket = seq.issue();
            let seq = seq.clone();
            let page = page.get_untracked();
            let used = filter_used.get_untracked();
            set_loading.set(true);
            spawn_local(async move {
                let result = TokomoApi::default().list_vip_codes(page, PAGE_SIZE, used).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(r) => {
                        set_codes.set(r.codes);
                        set_pagination.set(r.pagination);
                    }
                    Err(e) => toast.error(format!("加载 VIP 码失败: {e}")),
                }
                set_loading.set(false);
            });
        }
    };

    {
        let load = load.clone();
        Effect::new(move |_| {
            let _ = page.get();
            let _ = filter_used.get();
            load();
        });
    }

    // 群组选项一次拉满（群组数量很小）
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(r) = TokomoApi::default().list_groups(1, 100).await {
                set_groups.set(r.groups);
            }
        });
    });

    // ---------- 创建对话框 ----------
    let (creating, set_creating) = signal(false);
    let (c_code, set_c_code) = signal(String::new());
    let (c_days, set_c_days) = signal("30".to_string());
    let (c_group, set_c_group) = signal(String::new());
    let create_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = create_ref.get() {
            if creating.get() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_create = {
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let load = load.clone();
            let code = c_code.get_untracked().trim().to_string();
            let req = CreateVipCodeRequest {
                code: (!code.is_empty()).then_some(code),
                days: c_days.get_untracked().trim().parse().unwrap_or(30),
                group_id: c_group.get_untracked().parse().ok(),
            };
            spawn_local(async move {
                match TokomoApi::default().create_vip_code(&req).await {
                    Ok(()) => {
                        toast.success("VIP 码已创建");
                        set_creating.set(false);
                        set_c_code.set(String::new());
                        load();
                    }
                    Err(e) => toast.error(format!("创建 VIP 码失败: {e}")),
                }
            });
        }
    };

    // ---------- 批量生成对话框 + 结果 ----------
    let (batching, set_batching) = signal(false);
    let (b_count, set_b_count) = signal("10".to_string());
    let (b_days, set_b_days) = signal("30".to_string());
    let (b_prefix, set_b_prefix) = signal(String::new());
    let (b_group, set_b_group) = signal(String::new());
    let (batch_result, set_batch_result) = signal(Option::<Vec<String>>::None);
    let batch_ref = NodeRef::<leptos::html::Dialog>::new();
    let result_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = batch_ref.get() {
            if batching.get() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    Effect::new(move |_| {
        if let Some(dialog) = result_ref.get() {
            if batch_result.get().is_some() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_batch = {
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let load = load.clone();
            let prefix = b_prefix.get_untracked().trim().to_string();
            let req = BatchVipCodeRequest {
                count: b_count.get_untracked().trim().parse().unwrap_or(1),
                days: b_days.get_untracked().trim().parse().unwrap_or(30),
                prefix: (!prefix.is_empty()).then_some(prefix),
                group_id: b_group.get_untracked().parse().ok(),
            };
            spawn_local(async move {
                match TokomoApi::default().batch_create_vip_codes(&req).await {
                    Ok(r) => {
                        toast.success(format!("已生成 {} 个 VIP 码", r.created));
                        set_batching.set(false);
                        set_batch_result.set(Some(r.codes));
                        load();
                    }
                    Err(e) => toast.error(format!("批量生成失败: {e}")),
                }
            });
        }
    };

    let copy_all = move |_| {
        if let Some(codes) = batch_result.get_untracked() {
            if copy_to_clipboard(&codes.join("\n")) {
                toast.success("全部码已复制到剪贴板");
            } else {
                toast.error("复制失败");
            }
        }
    };

    // ---------- 编辑对话框 ----------
    let (editing, set_editing) = signal(Option::<i64>::None);
    let (e_days, set_e_days) = signal(String::new());
    let (e_used, set_e_used) = signal(false);
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

    let open_edit = move |c: &VipCode| {
        set_e_days.set(c.days.to_string());
        set_e_used.set(c.is_used());
        set_editing.set(Some(c.id));
    };

    let on_edit = {
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(id) = editing.get_untracked() else {
                return;
            };
            let load = load.clone();
            let req = UpdateVipCodeRequest {
                days: e_days.get_untracked().trim().parse().ok(),
                used: if e_used.get_untracked() { 1 } else { 0 },
            };
            spawn_local(async move {
                match TokomoApi::default().update_vip_code(id, &req).await {
                    Ok(()) => {
                        toast.success("VIP 码已更新");
                        set_editing.set(None);
                        load();
                    }
                    Err(e) => toast.error(format!("更新 VIP 码失败: {e}")),
                }
            });
        }
    };

    let on_delete = {
        let load = load.clone();
        move |id: i64, code: String| {
            if !confirm(&format!("确定删除 VIP 码 {code} 吗？")) {
                return;
            }
            let load = load.clone();
            spawn_local(async move {
                match TokomoApi::default().delete_vip_code(id).await {
                    Ok(()) => {
                        toast.success("VIP 码已删除");
                        load();
                    }
                    Err(e) => toast.error(format!("删除 VIP 码失败: {e}")),
                }
            });
        }
    };

    // 群组 id -> 名称
    let group_name = move |id: Option<i64>| -> String {
        match id {
            Some(id) => groups
                .get()
                .iter()
                .find(|g| g.id == id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| format!("#{id}")),
            None => "-".to_string(),
        }
    };

    view! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <h2 class="text-2xl font-bold">"VIP码管理"</h2>
                <div class="flex flex-wrap gap-2">
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            set_page.set(1);
                            set_filter_used.set(parse_tri(&event_target_value(&ev)));
                        }
                    >
                        <option value="">"全部状态"</option>
                        <option value="0">"未使用"</option>
                        <option value="1">"已使用"</option>
                    </select>
                    <button class="btn btn-sm" on:click=move |_| set_creating.set(true)>
                        "创建"
                    </button>
                    <button class="btn btn-sm" on:click=move |_| set_batching.set(true)>
                        "批量生成"
                    </button>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"VIP 码"</th>
                                <th>"天数"</th>
                                <th>"群组"</th>
                                <th>"状态"</th>
                                <th class="hidden md:table-cell">"使用时间"</th>
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
                                each=move || codes.get()
                                key=|c| c.id
                                children=move |c| {
                                    let id = c.id;
                                    let code = c.code.clone();
                                    let code_copy = c.code.clone();
                                    let code_del = c.code.clone();
                                    let used = c.is_used();
                                    let group = group_name(c.group_id);
                                    let used_at = c
                                        .used_at
                                        .as_deref()
                                        .map(date::format_datetime)
                                        .unwrap_or_else(|| "-".to_string());
                                    let edit_code = c.clone();
                                    let on_delete = on_delete.clone();
                                    view! {
                                        <tr>
                                            <td>
                                                <span
                                                    class="font-mono cursor-pointer hover:text-primary"
                                                    on:click=move |_| {
                                                        if copy_to_clipboard(&code_copy) {
                                                            toast.success("已复制到剪贴板");
                                                        }
                                                    }
                                                >
                                                    {code}
                                                </span>
                                            </td>
                                            <td>{c.days} " 天"</td>
                                            <td>{group}</td>
                                            <td>
                                                {if used {
                                                    view! {
                                                        <span class="badge badge-error badge-outline">
                                                            "已使用"
                                                        </span>
                                                    }
                                                        .into_any()
                                                } else {
                                                    view! {
                                                        <span class="badge badge-success badge-outline">
                                                            "未使用"
                                                        </span>
                                                    }
                                                        .into_any()
                                                }}
                                            </td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {used_at}
                                            </td>
                                            <td class="space-x-1 whitespace-nowrap">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| open_edit(&edit_code)
                                                >
                                                    "编辑"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    on:click=move |_| on_delete(id, code_del.clone())
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

            // 创建对话框
            <dialog class="modal" node_ref=create_ref on:close=move |_| set_creating.set(false)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"创建 VIP 码"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_create>
                        <div class="form-control">
                            <label class="label" for="vc-code">
                                <span class="label-text">"自定义码 (留空自动生成)"</span>
                            </label>
                            <input
                                id="vc-code"
                                type="text"
                                class="input input-bordered font-mono"
                                on:input=move |ev| set_c_code.set(event_target_value(&ev))
                                prop:value=c_code
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="vc-days">
                                <span class="label-text">"VIP 天数"</span>
                            </label>
                            <input
                                id="vc-days"
                                type="number"
                                min="1"
                                required
                                class="input input-bordered"
                                on:input=move |ev| set_c_days.set(event_target_value(&ev))
                                prop:value=c_days
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="vc-group">
                                <span class="label-text">"绑定群组 (可选)"</span>
                            </label>
                            <select
                                id="vc-group"
                                class="select select-bordered"
                                on:change=move |ev| set_c_group.set(event_target_value(&ev))
                            >
                                <option value="">"不绑定"</option>
                                <For
                                    each=move || groups.get()
                                    key=|g| g.id
                                    children=move |g| {
                                        view! { <option value=g.id.to_string()>{g.name}</option> }
                                    }
                                />
                            </select>
                        </div>
                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_creating.set(false)
                            >
                                "取消"
                            </button>
                            <button type="submit" class="btn btn-primary">
                                "创建"
                            </button>
                        </div>
                    </form>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>

            // 批量生成对话框
            <dialog class="modal" node_ref=batch_ref on:close=move |_| set_batching.set(false)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"批量生成 VIP 码"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_batch>
                        <div class="grid grid-cols-2 gap-3">
                            <div class="form-control">
                                <label class="label" for="vb-count">
                                    <span class="label-text">"数量 (1-1000)"</span>
                                </label>
                                <input
                                    id="vb-count"
                                    type="number"
                                    min="1"
                                    max="1000"
                                    required
                                    class="input input-bordered"
                                    on:input=move |ev| set_b_count.set(event_target_value(&ev))
                                    prop:value=b_count
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="vb-days">
                                    <span class="label-text">"VIP 天数"</span>
                                </label>
                                <input
                                    id="vb-days"
                                    type="number"
                                    min="1"
                                    required
                                    class="input input-bordered"
                                    on:input=move |ev| set_b_days.set(event_target_value(&ev))
                                    prop:value=b_days
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label" for="vb-prefix">
                                <span class="label-text">"前缀 (可选)"</span>
                            </label>
                            <input
                                id="vb-prefix"
                                type="text"
                                class="input input-bordered font-mono"
                                on:input=move |ev| set_b_prefix.set(event_target_value(&ev))
                                prop:value=b_prefix
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="vb-group">
                                <span class="label-text">"绑定群组 (可选)"</span>
                            </label>
                            <select
                                id="vb-group"
                                class="select select-bordered"
                                on:change=move |ev| set_b_group.set(event_target_value(&ev))
                            >
                                <option value="">"不绑定"</option>
                                <For
                                    each=move || groups.get()
                                    key=|g| g.id
                                    children=move |g| {
                                        view! { <option value=g.id.to_string()>{g.name}</option> }
                                    }
                                />
                            </select>
                        </div>
                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_batching.set(false)
                            >
                                "取消"
                            </button>
                            <button type="submit" class="btn btn-primary">
                                "生成"
                            </button>
                        </div>
                    </form>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>

            // 编辑对话框
            <dialog class="modal" node_ref=edit_ref on:close=move |_| set_editing.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"编辑 VIP 码"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_edit>
                        <div class="form-control">
                            <label class="label" for="ve-days">
                                <span class="label-text">"VIP 天数"</span>
                            </label>
                            <input
                                id="ve-days"
                                type="number"
                                min="1"
                                required
                                class="input input-bordered"
                                on:input=move |ev| set_e_days.set(event_target_value(&ev))
                                prop:value=e_days
                            />
                        </div>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"标记为已使用"</span>
                                <input
                                    type="checkbox"
                                    class="toggle toggle-error"
                                    prop:checked=e_used
                                    on:change=move |ev| set_e_used.set(event_target_checked(&ev))
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

            // 批量生成结果对话框
            <dialog class="modal" node_ref=result_ref on:close=move |_| set_batch_result.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"生成结果"</h3>
                    {move || {
                        batch_result
                            .get()
                            .map(|codes| {
                                view! {
                                    <div class="py-2">
                                        <pre class="bg-base-200 rounded-box p-3 font-mono text-sm max-h-60 overflow-y-auto">
                                            {codes.join("\n")}
                                        </pre>
                                    </div>
                                }
                            })
                    }}
                    <div class="modal-action">
                        <button class="btn btn-primary" on:click=copy_all>
                            "全部复制"
                        </button>
                        <button class="btn btn-ghost" on:click=move |_| set_batch_result.set(None)>
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
