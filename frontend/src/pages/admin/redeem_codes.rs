//! 兑换码管理
//!
//! 筛选（使用状态 / 是否免费）、单个创建、批量生成、编辑、删除、
//! 表格导入导出。已使用是终态：该行不提供编辑和删除。
//! 编辑时若改了码本身，服务端不支持改码，走“删旧建新”。

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{TokomoApi, download_bytes};
use crate::components::copy::copy_to_clipboard;
use crate::components::pagination::Pager;
use crate::components::toast::use_toast;
use crate::web::RequestSeq;
use tokomo_shared::{
    BatchRedeemCodeRequest, CreateRedeemCodeRequest, ImportResponse, Pagination, RedeemCode,
    UpdateRedeemCodeRequest, date,
};

const PAGE_SIZE: u32 = 10;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

/// "全部 / 是 / 否" 下拉的取值解析
fn parse_tri(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

#[component]
pub fn AdminRedeemCodesPage() -> impl IntoView {
    let toast = use_toast();

    let (codes, set_codes) = signal(Vec::<RedeemCode>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (page, set_page) = signal(1u32);
    let (filter_used, set_filter_used) = signal(Option::<bool>::None);
    let (filter_free, set_filter_free) = signal(Option::<bool>::None);

    let seq = RequestSeq::new();

    let load = {
        let seq = seq.clone();
        move || {
            let ticket = seq.issue();
            let seq = seq.clone();
            let page = page.get_untracked();
            let used = filter_used.get_untracked();
            let free = filter_free.get_untracked();
            set_loading.set(true);
            spawn_local(async move {
                let result = TokomoApi::default()
                    .list_redeem_codes(page, PAGE_SIZE, used, free)
                    .await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(r) => {
                        set_codes.set(r.codes);
                        set_pagination.set(r.pagination);
                    }
                    Err(e) => toast.error(format!("加载兑换码失败: {e}")),
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
            let _ = filter_free.get();
            load();
        });
    }

    // ---------- 创建对话框 ----------
    let (creating, set_creating) = signal(false);
    let (c_code, set_c_code) = signal(String::new());
    let (c_points, set_c_points) = signal("10".to_string());
    let (c_free, set_c_free) = signal(false);
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
            let req = CreateRedeemCodeRequest {
                code: (!code.is_empty()).then_some(code),
                points: c_points.get_untracked().trim().parse().unwrap_or(0),
                is_free: c_free.get_untracked(),
            };
            spawn_local(async move {
                match TokomoApi::default().create_redeem_code(&req).await {
                    Ok(()) => {
                        toast.success("兑换码已创建");
                        set_creating.set(false);
                        set_c_code.set(String::new());
                        load();
                    }
                    Err(e) => toast.error(format!("创建兑换码失败: {e}")),
                }
            });
        }
    };

    // ---------- 批量生成对话框 ----------
    let (batching, set_batching) = signal(false);
    let (b_count, set_b_count) = signal("10".to_string());
    let (b_points, set_b_points) = signal("10".to_string());
    let (b_prefix, set_b_prefix) = signal(String::new());
    let (b_free, set_b_free) = signal(false);
    let batch_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = batch_ref.get() {
            if batching.get() {
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
            let req = BatchRedeemCodeRequest {
                count: b_count.get_untracked().trim().parse().unwrap_or(1),
                points: b_points.get_untracked().trim().parse().unwrap_or(0),
                prefix: (!prefix.is_empty()).then_some(prefix),
                is_free: b_free.get_untracked(),
            };
            spawn_local(async move {
                match TokomoApi::default().batch_create_redeem_codes(&req).await {
                    Ok(r) => {
                        toast.success(format!("已生成 {} 个兑换码", r.created));
                        set_batching.set(false);
                        load();
                    }
                    Err(e) => toast.error(format!("批量生成失败: {e}")),
                }
            });
        }
    };

    // ---------- 编辑对话框 ----------
    // 保留原始码：改了码意味着删旧建新
    let (editing, set_editing) = signal(Option::<RedeemCode>::None);
    let (e_code, set_e_code) = signal(String::new());
    let (e_points, set_e_points) = signal(String::new());
    let (e_free, set_e_free) = signal(false);
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

    let open_edit = move |c: &RedeemCode| {
        set_e_code.set(c.code.clone());
        set_e_points.set(c.points.to_string());
        set_e_free.set(c.is_free());
        set_editing.set(Some(c.clone()));
    };

    let on_edit = {
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(original) = editing.get_untracked() else {
                return;
            };
            let load = load.clone();
            let code = e_code.get_untracked().trim().to_string();
            let points = e_points.get_untracked().trim().parse().unwrap_or(0);
            let is_free = e_free.get_untracked();
            spawn_local(async move {
                let api = TokomoApi::default();
                let result = if code != original.code {
                    // 码本身变了：删旧建新
                    match api.delete_redeem_code(original.id).await {
                        Ok(()) => {
                            api.create_redeem_code(&CreateRedeemCodeRequest {
                                code: Some(code),
                                points,
                                is_free,
                            })
                            .await
                        }
                        Err(e) => Err(e),
                    }
                } else {
                    api.update_redeem_code(
                        original.id,
                        &UpdateRedeemCodeRequest { points, is_free },
                    )
                    .await
                };
                match result {
                    Ok(()) => {
                        toast.success("兑换码已更新");
                        set_editing.set(None);
                        load();
                    }
                    Err(e) => toast.error(format!("更新兑换码失败: {e}")),
                }
            });
        }
    };

    let on_delete = {
        let load = load.clone();
        move |id: i64, code: String| {
            if !confirm(&format!("确定删除兑换码 {code} 吗？")) {
                return;
            }
            let load = load.clone();
            spawn_local(async move {
                match TokomoApi::default().delete_redeem_code(id).await {
                    Ok(()) => {
                        toast.success("兑换码已删除");
                        load();
                    }
                    Err(e) => toast.error(format!("删除兑换码失败: {e}")),
                }
            });
        }
    };

    // ---------- 导入 / 导出 ----------
    let (import_result, set_import_result) = signal(Option::<ImportResponse>::None);
    let result_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = result_ref.get() {
            if import_result.get().is_some() {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_import_file = {
        let load = load.clone();
        move |ev: leptos::web_sys::Event| {
            let load = load.clone();
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            spawn_local(async move {
                match TokomoApi::default().import_redeem_codes(file).await {
                    Ok(r) => {
                        set_import_result.set(Some(r));
                        load();
                    }
                    Err(e) => toast.error(format!("导入失败: {e}")),
                }
            });
        }
    };

    let on_export = move |_| {
        spawn_local(async move {
            match TokomoApi::default().export_redeem_codes().await {
                Ok(bytes) => {
                    if !download_bytes("redeem_codes.xlsx", &bytes) {
                        toast.error("生成下载失败");
                    }
                }
                Err(e) => toast.error(format!("导出失败: {e}")),
            }
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <h2 class="text-2xl font-bold">"兑换码管理"</h2>
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
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            set_page.set(1);
                            set_filter_free.set(parse_tri(&event_target_value(&ev)));
                        }
                    >
                        <option value="">"全部类型"</option>
                        <option value="1">"免费码"</option>
                        <option value="0">"普通码"</option>
                    </select>
                    <button class="btn btn-sm" on:click=move |_| set_creating.set(true)>
                        "创建"
                    </button>
                    <button class="btn btn-sm" on:click=move |_| set_batching.set(true)>
                        "批量生成"
                    </button>
                    <label class="btn btn-sm btn-outline">
                        "导入"
                        <input
                            type="file"
                            accept=".xlsx,.xls,.csv"
                            class="hidden"
                            on:change=on_import_file
                        />
                    </label>
                    <button class="btn btn-sm btn-outline" on:click=on_export>
                        "导出"
                    </button>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"兑换码"</th>
                                <th>"积分"</th>
                                <th>"类型"</th>
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
                                    let is_free = c.is_free();
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
                                            <td>{c.points}</td>
                                            <td>
                                                {if is_free {
                                                    view! {
                                                        <span class="badge badge-info badge-outline">
                                                            "免费"
                                                        </span>
                                                    }
                                                        .into_any()
                                                } else {
                                                    view! { <span class="badge badge-ghost">"普通"</span> }
                                                        .into_any()
                                                }}
                                            </td>
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
                                                // 已使用是终态，不提供编辑和删除
                                                {(!used)
                                                    .then(|| {
                                                        let edit_code = edit_code.clone();
                                                        let on_delete = on_delete.clone();
                                                        let code = code_del.clone();
                                                        view! {
                                                            <button
                                                                class="btn btn-ghost btn-xs"
                                                                on:click=move |_| open_edit(&edit_code)
                                                            >
                                                                "编辑"
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                on:click=move |_| on_delete(id, code.clone())
                                                            >
                                                                "删除"
                                                            </button>
                                                        }
                                                    })}
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
                    <h3 class="font-bold text-lg">"创建兑换码"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_create>
                        <div class="form-control">
                            <label class="label" for="rc-code">
                                <span class="label-text">"自定义码 (留空自动生成)"</span>
                            </label>
                            <input
                                id="rc-code"
                                type="text"
                                class="input input-bordered font-mono"
                                on:input=move |ev| set_c_code.set(event_target_value(&ev))
                                prop:value=c_code
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="rc-points">
                                <span class="label-text">"积分"</span>
                            </label>
                            <input
                                id="rc-points"
                                type="number"
                                min="1"
                                required
                                class="input input-bordered"
                                on:input=move |ev| set_c_points.set(event_target_value(&ev))
                                prop:value=c_points
                            />
                        </div>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"免费码 (无需登录领取)"</span>
                                <input
                                    type="checkbox"
                                    class="toggle toggle-info"
                                    prop:checked=c_free
                                    on:change=move |ev| set_c_free.set(event_target_checked(&ev))
                                />
                            </label>
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
                    <h3 class="font-bold text-lg">"批量生成兑换码"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_batch>
                        <div class="grid grid-cols-2 gap-3">
                            <div class="form-control">
                                <label class="label" for="rb-count">
                                    <span class="label-text">"数量 (1-1000)"</span>
                                </label>
                                <input
                                    id="rb-count"
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
                                <label class="label" for="rb-points">
                                    <span class="label-text">"每个积分"</span>
                                </label>
                                <input
                                    id="rb-points"
                                    type="number"
                                    min="1"
                                    required
                                    class="input input-bordered"
                                    on:input=move |ev| set_b_points.set(event_target_value(&ev))
                                    prop:value=b_points
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label" for="rb-prefix">
                                <span class="label-text">"前缀 (可选)"</span>
                            </label>
                            <input
                                id="rb-prefix"
                                type="text"
                                class="input input-bordered font-mono"
                                on:input=move |ev| set_b_prefix.set(event_target_value(&ev))
                                prop:value=b_prefix
                            />
                        </div>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"免费码"</span>
                                <input
                                    type="checkbox"
                                    class="toggle toggle-info"
                                    prop:checked=b_free
                                    on:change=move |ev| set_b_free.set(event_target_checked(&ev))
                                />
                            </label>
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
                    <h3 class="font-bold text-lg">"编辑兑换码"</h3>
                    <form class="space-y-3 mt-2" on:submit=on_edit>
                        <div class="form-control">
                            <label class="label" for="re-code">
                                <span class="label-text">"兑换码 (修改将删旧建新)"</span>
                            </label>
                            <input
                                id="re-code"
                                type="text"
                                required
                                class="input input-bordered font-mono"
                                on:input=move |ev| set_e_code.set(event_target_value(&ev))
                                prop:value=e_code
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="re-points">
                                <span class="label-text">"积分"</span>
                            </label>
                            <input
                                id="re-points"
                                type="number"
                                min="1"
                                required
                                class="input input-bordered"
                                on:input=move |ev| set_e_points.set(event_target_value(&ev))
                                prop:value=e_points
                            />
                        </div>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"免费码"</span>
                                <input
                                    type="checkbox"
                                    class="toggle toggle-info"
                                    prop:checked=e_free
                                    on:change=move |ev| set_e_free.set(event_target_checked(&ev))
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

            // 导入结果对话框
            <dialog class="modal" node_ref=result_ref on:close=move |_| set_import_result.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"导入结果"</h3>
                    {move || {
                        import_result
                            .get()
                            .map(|r| {
                                view! {
                                    <div class="py-2 space-y-2">
                                        <p>
                                            "成功导入 "
                                            <span class="text-success font-bold">{r.imported}</span>
                                            " 条，失败 "
                                            <span class="text-error font-bold">{r.failed}</span> " 条"
                                        </p>
                                        <Show when={
                                            let has_errors = !r.errors.is_empty();
                                            move || has_errors
                                        }>
                                            <ul class="text-sm text-error bg-error/10 rounded-box p-3 space-y-1 max-h-40 overflow-y-auto">
                                                {r
                                                    .errors
                                                    .iter()
                                                    .map(|e| view! { <li>{e.clone()}</li> })
                                                    .collect::<Vec<_>>()}
                                            </ul>
                                        </Show>
                                    </div>
                                }
                            })
                    }}
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| set_import_result.set(None)>
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
