//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。HTTP 请求例外，仍走 gloo-net（见 `crate::api`）。

pub mod route;
pub mod router;
mod seq;
mod storage;
mod timer;

pub use seq::RequestSeq;
pub use storage::LocalStorage;
pub use timer::Interval;
