#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![allow(private_bounds)]
#![warn(missing_docs)]
#![doc = "mimosa-core: 以 MIME flavor 协商为核心的内容处理器契约层。"]
#![doc = ""]
#![doc = "== 定位 =="]
#![doc = "本 crate 只定义契约：flavor 描述符、内容源、处理器（泛型层与对象层）以及注册中心。"]
#![doc = "具体的内容解码实现位于 `mimosa-handler-*` 扩展 crate，通过 `mimosa-handlers` 聚合层接入。"]
#![doc = ""]
#![doc = "== 内存分配依赖 =="]
#![doc = "`mimosa-core` 定位于 `no_std + alloc` 场景：描述符与解码产物依赖 [`alloc`] 中的 `Box`、`Vec`、`Cow`。"]
#![doc = "纯 `no_std`（无分配器）环境暂不支持。"]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

mod sealed;

pub mod error;
pub mod flavor;
pub mod handler;
pub mod registry;
pub mod source;

pub use error::{HandlerError, Result, codes};
pub use flavor::{FlavorDescriptor, MimeType};
pub use handler::{ContentHandler, DynContentHandler, TypedHandlerAdapter, downcast_content};
pub use registry::HandlerRegistry;
pub use source::{BytesSource, ContentSource};

/// 对象安全的错误抽象，承担 `no_std + alloc` 环境下 `std::error::Error` 的角色。
///
/// # 设计背景（Why）
/// - 内容源的读取失败往往由宿主 I/O 层产生，需要一条与 `std` 解耦的根因链路；
/// - 约束实现者提供 `Debug` 与 `Display`，便于日志与排障信息收集。
///
/// # 契约说明（What）
/// - **前置条件**：实现类型若要作为 [`HandlerError`] 的底层原因，必须满足 `Send + Sync + 'static`。
/// - **后置条件**：`source` 返回的引用生命周期受限于 `self`，以防悬垂引用。
///
/// # 设计取舍与风险（Trade-offs）
/// - Trait 本身不强加 `Send + Sync`，避免对轻量实现强加多余负担；线程安全需求由
///   [`error::ErrorCause`] 类型别名表达。
/// - 若底层错误不提供 `source`，错误链会在此处终止，这是设计上允许的边界情况。
pub trait Error: fmt::Debug + fmt::Display + crate::sealed::Sealed {
    /// 返回当前错误的上游来源。
    #[allow(unused_parens)]
    fn source(&self) -> Option<&(dyn Error + 'static)>;
}

impl<E> Error for Box<E>
where
    E: Error + ?Sized,
{
    #[allow(unused_parens)]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        (**self).source()
    }
}
