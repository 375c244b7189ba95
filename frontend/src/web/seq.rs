//! 请求序号模块
//!
//! 列表页的翻页和筛选可能在前一次请求还未返回时再次触发。
//! 每次发起请求前领取一张单调递增的票据，响应返回后只有
//! 持有最新票据的那次请求才允许写入页面状态，过期响应直接丢弃。
//!
//! 计数器用 `Arc<AtomicU64>`：wasm 单线程下无额外开销，
//! 同时满足 leptos 组件闭包的 `Send` 约束。
//! 纯逻辑，不依赖 DOM，可在任意平台测试。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 每个列表页持有一个 `RequestSeq`（clone 共享同一计数器）
#[derive(Clone, Default)]
pub struct RequestSeq {
    latest: Arc<AtomicU64>,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// 领取新票据，并使之前发出的所有票据作废
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 检查票据是否仍是最新
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_invalidates_older() {
        let seq = RequestSeq::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn clones_share_one_counter() {
        let seq = RequestSeq::new();
        let alias = seq.clone();
        let ticket = seq.issue();
        assert!(alias.is_current(ticket));
        alias.issue();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn seq_handles_move_into_send_closures() {
        fn assert_send<T: Send>(_: &T) {}
        let seq = RequestSeq::new();
        assert_send(&seq);
        let alias = seq.clone();
        let closure = move || alias.issue();
        assert_send(&closure);
        assert!(seq.is_current(closure()));
    }
}
