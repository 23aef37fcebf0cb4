#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! `mimosa-handler-text` 提供 `text/plain` 负载的内容处理扩展。
//!
//! # 教案背景（Why）
//! - 在不修改核心 crate 的前提下新增处理器，演示如何编写遵循 `mimosa-handlers` 契约的扩展；
//! - 纯文本是内容处理器家族中最常见的成员，覆盖字符集分支与错误上报，形成参考实现。
//!
//! # 使用概览（How）
//! - 引入本 crate 后，可直接实例化 [`TextHandler`] 并经 `TypedHandlerAdapter` 注册到
//!   `HandlerRegistry`；
//! - 解码端读取完整负载，并按**内容源**类型标注中的 `charset=` 参数选择字符集。
//!
//! # 合约说明（What）
//! - 该扩展完全依赖 `mimosa-handlers` 聚合后的稳定接口；
//! - 所有错误码遵循 `mimosa_handlers::codes` 约定，便于在日志中统一聚合；
//! - 声明 flavor 为 `text/plain; charset=utf-8`，参数不敏感等值保证任意 `text/plain` 请求命中。
//!
//! # 风险提示与后续（Trade-offs）
//! - 字符集支持刻意保持最小集合（UTF-8、US-ASCII、ISO-8859-1）；完整的字符集转码属于外部
//!   编解码协作者的职责，不在本契约层扩张。

extern crate alloc;

mod text;

pub use crate::text::TextHandler;
