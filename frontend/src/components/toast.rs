//! 全局提示模块
//!
//! 页面级错误和操作结果统一走这里，不留在各页面自行渲染。

use leptos::prelude::*;

/// 单条提示：序号 + 内容 + 是否出错
///
/// 序号由上下文递增分配，定时清除只作用于仍然挂着的那条，
/// 后来的提示不会被前一条的定时器提前抹掉。
#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub text: String,
    pub is_error: bool,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    message: ReadSignal<Option<ToastMessage>>,
    set_message: WriteSignal<Option<ToastMessage>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    pub fn success(&self, msg: impl Into<String>) {
        self.show(msg.into(), false);
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.show(msg.into(), true);
    }

    fn show(&self, text: String, is_error: bool) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);
        self.set_message.set(Some(ToastMessage { id, text, is_error }));
    }
}

/// 在 App 根部提供提示上下文
pub fn provide_toast() -> ToastContext {
    let (message, set_message) = signal(Option::<ToastMessage>::None);
    let ctx = ToastContext {
        message,
        set_message,
        next_id: RwSignal::new(0),
    };
    provide_context(ctx);
    ctx
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 提示渲染组件，挂在 App 根部
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toast();
    let message = ctx.message;
    let set_message = ctx.set_message;

    // 3 秒后清除；凭序号只清除自己那条
    Effect::new(move |_| {
        if let Some(current) = message.get() {
            let id = current.id;
            set_timeout(
                move || {
                    set_message.update(|m| {
                        if m.as_ref().is_some_and(|m| m.id == id) {
                            *m = None;
                        }
                    });
                },
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if message.get().is_some_and(|m| m.is_error) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || message.get().map(|m| m.text).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_toast_outlives_earlier_timer() {
        let owner = Owner::new();
        owner.set();

        let ctx = provide_toast();
        ctx.success("第一条");
        let first_id = ctx.message.get_untracked().unwrap().id;
        ctx.error("第二条");
        let second = ctx.message.get_untracked().unwrap();
        assert_ne!(first_id, second.id);

        // 第一条的定时器到点：序号已不匹配，不得清除第二条
        ctx.set_message.update(|m| {
            if m.as_ref().is_some_and(|m| m.id == first_id) {
                *m = None;
            }
        });
        assert_eq!(ctx.message.get_untracked(), Some(second.clone()));

        // 第二条自己的定时器到点才清除
        ctx.set_message.update(|m| {
            if m.as_ref().is_some_and(|m| m.id == second.id) {
                *m = None;
            }
        });
        assert!(ctx.message.get_untracked().is_none());
    }

    #[test]
    fn render_closures_tolerate_cleared_message() {
        let owner = Owner::new();
        owner.set();

        let ctx = provide_toast();
        ctx.success("已保存");
        ctx.set_message.set(None);
        // Show 卸载前内部闭包可能再跑一次，读到 None 不得 panic
        assert!(!ctx.message.get_untracked().is_some_and(|m| m.is_error));
        assert_eq!(
            ctx.message
                .get_untracked()
                .map(|m| m.text)
                .unwrap_or_default(),
            ""
        );
    }
}
