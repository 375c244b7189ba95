//! 游戏管理
//!
//! 新建和编辑共用一个对话框；gameName / downloadUrl / price 为必填，
//! 由 HTML required 拦截。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::TokomoApi;
use crate::components::pagination::Pager;
use crate::components::toast::use_toast;
use crate::web::RequestSeq;
use tokomo_shared::{Game, GameUpsertRequest, Pagination};

const PAGE_SIZE: u32 = 10;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

/// 对话框状态：关闭 / 新建 / 编辑某个游戏
#[derive(Clone, Copy, PartialEq)]
enum Editor {
    Closed,
    Create,
    Edit(i64),
}

#[component]
pub fn AdminGamesPage() -> impl IntoView {
    let toast = use_toast();

    let (games, set_games) = signal(Vec::<Game>::new());
    let (pagination, set_pagination) = signal(Pagination::default());
    let (loading, set_loading) = signal(true);
    let (page, set_page) = signal(1u32);
    let (search, set_search) = signal(String::new());
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
                let result = TokomoApi::default().list_games(page, PAGE_SIZE, search).await;
                if !seq.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(r) => {
                        set_games.set(r.games);
                        set_pagination.set(r.pagination);
                    }
                    Err(e) => toast.error(format!("加载游戏列表失败: {e}")),
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

    // ---------- 编辑对话框 ----------
    let (editor, set_editor) = signal(Editor::Closed);
    let (f_name, set_f_name) = signal(String::new());
    let (f_type, set_f_type) = signal(String::new());
    let (f_url, set_f_url) = signal(String::new());
    let (f_price, set_f_price) = signal(String::new());
    let (f_password, set_f_password) = signal(String::new());
    let (f_extract, set_f_extract) = signal(String::new());
    let (f_note, set_f_note) = signal(String::new());
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if editor.get() != Editor::Closed {
                let _ = dialog.show_modal();
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let open_create = move |_| {
        set_f_name.set(String::new());
        set_f_type.set(String::new());
        set_f_url.set(String::new());
        set_f_price.set("0".to_string());
        set_f_password.set(String::new());
        set_f_extract.set(String::new());
        set_f_note.set(String::new());
        set_editor.set(Editor::Create);
    };

    let open_edit = move |g: &Game| {
        set_f_name.set(g.game_name.clone());
        set_f_type.set(g.game_type.clone().unwrap_or_default());
        set_f_url.set(g.download_url.clone());
        set_f_price.set(g.price.to_string());
        set_f_password.set(g.password.clone().unwrap_or_default());
        set_f_extract.set(g.extract_password.clone().unwrap_or_default());
        set_f_note.set(g.note.clone().unwrap_or_default());
        set_editor.set(Editor::Edit(g.id));
    };

    let on_submit = {
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let mode = editor.get_untracked();
            let load = load.clone();
            let opt = |s: String| {
                let s = s.trim().to_string();
                (!s.is_empty()).then_some(s)
            };
            let req = GameUpsertRequest {
                game_name: f_name.get_untracked().trim().to_string(),
                download_url: f_url.get_untracked().trim().to_string(),
                price: f_price.get_untracked().trim().parse().unwrap_or(0),
                game_type: opt(f_type.get_untracked()),
                password: opt(f_password.get_untracked()),
                extract_password: opt(f_extract.get_untracked()),
                note: opt(f_note.get_untracked()),
            };
            spawn_local(async move {
                let api = TokomoApi::default();
                let result = match mode {
                    Editor::Create => api.create_game(&req).await,
                    Editor::Edit(id) => api.update_game(id, &req).await,
                    Editor::Closed => return,
                };
                match result {
                    Ok(()) => {
                        toast.success(if mode == Editor::Create {
                            "游戏已上架"
                        } else {
                            "游戏已更新"
                        });
                        set_editor.set(Editor::Closed);
                        load();
                    }
                    Err(e) => toast.error(format!("保存游戏失败: {e}")),
                }
            });
        }
    };

    let on_delete = {
        let load = load.clone();
        move |id: i64, name: String| {
            if !confirm(&format!("确定下架游戏 {name} 吗？")) {
                return;
            }
            let load = load.clone();
            spawn_local(async move {
                match TokomoApi::default().delete_game(id).await {
                    Ok(()) => {
                        toast.success("游戏已下架");
                        load();
                    }
                    Err(e) => toast.error(format!("下架游戏失败: {e}")),
                }
            });
        }
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"游戏管理"</h2>
                <div class="flex gap-2">
                    <form class="join" on:submit=on_search>
                        <input
                            type="text"
                            placeholder="搜索游戏"
                            class="input input-bordered input-sm join-item"
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            prop:value=search
                        />
                        <button type="submit" class="btn btn-sm join-item">
                            "搜索"
                        </button>
                    </form>
                    <button class="btn btn-sm btn-primary" on:click=open_create>
                        "上架游戏"
                    </button>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"名称"</th>
                                <th>"类型"</th>
                                <th>"价格"</th>
                                <th class="hidden md:table-cell">"下载地址"</th>
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
                                each=move || games.get()
                                key=|g| g.id
                                children=move |g| {
                                    let id = g.id;
                                    let name = g.game_name.clone();
                                    let name_del = g.game_name.clone();
                                    let game_type = g.game_type.clone().unwrap_or_default();
                                    let url = g.download_url.clone();
                                    let price = g.price;
                                    let edit_game = g.clone();
                                    let on_delete = on_delete.clone();
                                    view! {
                                        <tr>
                                            <td class="font-bold">{name}</td>
                                            <td>{game_type}</td>
                                            <td>
                                                {if price == 0 {
                                                    "免费".to_string()
                                                } else {
                                                    format!("{price} 积分")
                                                }}
                                            </td>
                                            <td class="hidden md:table-cell max-w-xs truncate font-mono text-xs opacity-60">
                                                {url}
                                            </td>
                                            <td class="space-x-1 whitespace-nowrap">
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| open_edit(&edit_game)
                                                >
                                                    "编辑"
                                                </button>
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    on:click=move |_| on_delete(id, name_del.clone())
                                                >
                                                    "下架"
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
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_editor.set(Editor::Closed)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        {move || {
                            if editor.get() == Editor::Create { "上架游戏" } else { "编辑游戏" }
                        }}
                    </h3>
                    <form class="space-y-3 mt-2" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="game-name">
                                <span class="label-text">"游戏名称"</span>
                            </label>
                            <input
                                id="game-name"
                                type="text"
                                required
                                class="input input-bordered"
                                on:input=move |ev| set_f_name.set(event_target_value(&ev))
                                prop:value=f_name
                            />
                        </div>
                        <div class="grid grid-cols-2 gap-3">
                            <div class="form-control">
                                <label class="label" for="game-type">
                                    <span class="label-text">"类型"</span>
                                </label>
                                <input
                                    id="game-type"
                                    type="text"
                                    placeholder="RPG / SLG ..."
                                    class="input input-bordered"
                                    on:input=move |ev| set_f_type.set(event_target_value(&ev))
                                    prop:value=f_type
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="game-price">
                                    <span class="label-text">"价格 (积分，0 为免费)"</span>
                                </label>
                                <input
                                    id="game-price"
                                    type="number"
                                    min="0"
                                    required
                                    class="input input-bordered"
                                    on:input=move |ev| set_f_price.set(event_target_value(&ev))
                                    prop:value=f_price
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label" for="game-url">
                                <span class="label-text">"下载地址"</span>
                            </label>
                            <input
                                id="game-url"
                                type="text"
                                required
                                class="input input-bordered font-mono"
                                on:input=move |ev| set_f_url.set(event_target_value(&ev))
                                prop:value=f_url
                            />
                        </div>
                        <div class="grid grid-cols-2 gap-3">
                            <div class="form-control">
                                <label class="label" for="game-password">
                                    <span class="label-text">"访问密码"</span>
                                </label>
                                <input
                                    id="game-password"
                                    type="text"
                                    class="input input-bordered font-mono"
                                    on:input=move |ev| set_f_password.set(event_target_value(&ev))
                                    prop:value=f_password
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="game-extract">
                                    <span class="label-text">"解压密码"</span>
                                </label>
                                <input
                                    id="game-extract"
                                    type="text"
                                    class="input input-bordered font-mono"
                                    on:input=move |ev| set_f_extract.set(event_target_value(&ev))
                                    prop:value=f_extract
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label" for="game-note">
                                <span class="label-text">"备注"</span>
                            </label>
                            <textarea
                                id="game-note"
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
        </div>
    }
}
