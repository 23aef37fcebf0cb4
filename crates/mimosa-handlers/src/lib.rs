#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! # mimosa-handlers
//!
//! ## 教案意图（Why）
//! - **职责定位**：为各类 `mimosa-handler-*` 实现提供统一、稳定的契约接口，
//!   避免每个处理器 crate 直接追踪 `mimosa-core` 的演进细节。
//! - **架构价值**：通过集中 re-export `mimosa-core` 的 flavor/处理器/错误等稳定面，实现处理器
//!   层面的插拔替换，同时维持核心 crate 的演进节奏。
//! - **团队协作**：简化处理器 crate 的依赖拓扑，使并行开发时仅需关注本格式逻辑即可。
//!
//! ## 使用方式（How）
//! - 在处理器 crate 中引入 `mimosa-handlers`，即可访问 [`ContentHandler`]、[`FlavorDescriptor`]、
//!   [`ContentSource`] 等核心接口，并沿用 `mimosa-core` 的错误类型；
//! - Feature `alloc`/`std`/`serde` 直接透传到 `mimosa-core`，保持二者行为一致。
//!
//! ## 契约说明（What）
//! - 对外暴露的所有类型均来源于 `mimosa-core`，确保语义一致；
//! - 不额外引入状态或逻辑，纯粹扮演“接口整合层”；
//! - **后置条件**：处理器 crate 仅依赖 `mimosa-handlers` 亦可完整实现解码逻辑。
//!
//! ## 风险提示（Trade-offs）
//! - 本 crate 为 re-export 形态，后续若核心层重构需同步更新此处映射。

extern crate alloc;

/// 统一暴露核心错误类型。
pub use mimosa_core::HandlerError;
/// 暴露完整的错误模块，便于处理器实现引用 `ErrorCause` 等类型。
pub use mimosa_core::error;
/// 暴露错误码常量命名空间。
pub use mimosa_core::error::codes;
/// 暴露 flavor 模块，保持原有路径结构。
pub use mimosa_core::flavor;
/// 便捷 re-export：直接在 crate 根访问常用契约接口。
pub use mimosa_core::{
    BytesSource, ContentHandler, ContentSource, DynContentHandler, FlavorDescriptor,
    HandlerRegistry, MimeType, TypedHandlerAdapter, downcast_content,
};
