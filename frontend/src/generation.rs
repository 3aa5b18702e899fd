//! 过期响应保护
//!
//! 页面发起请求前领取一张票据，响应返回时只有票据仍是最新的才写入页面状态。
//! 重新发起请求或页面卸载都会推进代数，迟到的响应随之作废。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 请求代数计数器（廉价 Clone，可放入 `on_cleanup`）
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

/// 某一代请求的票据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新一代请求，之前的票据全部失效
    pub fn next(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// 使所有已发出的票据失效（页面卸载时调用）
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}
