//! 处理器契约：flavor 分发式的类型化内容解码。
//!
//! # 设计背景（Why）
//! - 来源于“数据内容处理器”家族的抽象基类模式：子类只需声明 flavor 列表并实现自然类型的
//!   解码，匹配与分发逻辑由基础设施统一提供。Rust 侧以 trait 默认方法取代继承表达同一结构；
//! - 与编解码契约的二层 API 一致：泛型层（[`ContentHandler`]）零成本、强类型，对象层
//!   （[`DynContentHandler`]）类型擦除、可装入注册中心。
//!
//! # 结构概览（What）
//! - [`ContentHandler`]：泛型契约，两个必选方法 + 两个默认方法；
//! - [`DynContentHandler`]：对象安全镜像，解码产物为 `Box<dyn Any + Send + Sync>`；
//! - [`TypedHandlerAdapter`]：泛型 → 对象层的桥接适配器；
//! - [`downcast_content`]：对象层产物的类型还原辅助。
//!
//! # 实现策略（How）
//! - flavor 匹配是对声明列表的线性扫描，声明顺序即优先级，首个命中即分发；
//! - “无匹配”以 `Ok(None)` 表达，**不是错误**——调用方必须能区分“无法解码”与“解码失败”。

use alloc::{boxed::Box, format};
use core::any::Any;

use crate::error::{HandlerError, codes};
use crate::flavor::FlavorDescriptor;
use crate::sealed::Sealed;
use crate::source::ContentSource;

/// `ContentHandler` 是泛型层的内容处理契约。
///
/// # 设计初衷（Why）
/// - 绝大多数处理器只支持单一 flavor，默认方法让这类实现只写两个方法即可；
/// - 关联类型 `Output` 保证解码产物的静态类型安全，所有权完整转移给调用方。
///
/// # 行为逻辑（How）
/// 1. [`flavors`](Self::flavors) 返回固定有序列表；
/// 2. [`content`](Self::content) 按源的自然类型解码；
/// 3. [`content_for_flavor`](Self::content_for_flavor) 默认忽略 flavor 直接委托 `content`，
///    支持多 flavor 的实现按需覆写；
/// 4. [`matching_content`](Self::matching_content) 完成“匹配 + 分发”，调用方通常只触达此方法。
///
/// # 契约说明（What）
/// - **前置条件**：`flavors()` 必须非空，且跨调用保持稳定（返回处理器自有的切片）；
/// - **后置条件**：解码错误原样向上传播，永不吞没；无匹配返回 `Ok(None)`；
/// - 处理器除固定的 flavor 列表外不得持有可变状态，以保证跨线程并发调用安全。
pub trait ContentHandler: Send + Sync + 'static + Sealed {
    /// 解码产物的类型，所有权转移给调用方。
    type Output: Send + Sync + 'static;

    /// 返回处理器支持的 flavor 固定有序列表。
    fn flavors(&self) -> &[FlavorDescriptor];

    /// 按源的自然类型解码完整负载。
    fn content(&self, source: &dyn ContentSource) -> crate::Result<Self::Output, HandlerError>;

    /// 针对已匹配的 flavor 解码。
    ///
    /// 默认实现忽略 `flavor` 并委托 [`content`](Self::content)——这是单 flavor 处理器的
    /// 既定策略；声明多个 flavor 的实现应覆写本方法按 flavor 分支。
    fn content_for_flavor(
        &self,
        flavor: &FlavorDescriptor,
        source: &dyn ContentSource,
    ) -> crate::Result<Self::Output, HandlerError> {
        let _ = flavor;
        self.content(source)
    }

    /// 匹配请求的 flavor 并分发解码。
    ///
    /// # 契约说明（What）
    /// - 按声明顺序线性扫描 [`flavors`](Self::flavors)，以参数不敏感的等值语义比对；
    /// - 首个命中即调用 [`content_for_flavor`](Self::content_for_flavor)，其余声明不再尝试
    ///   （仅当实现罕见地声明了重叠描述符时才有影响）；
    /// - 无匹配返回 `Ok(None)`；解码错误原样传播。
    fn matching_content(
        &self,
        requested: &FlavorDescriptor,
        source: &dyn ContentSource,
    ) -> crate::Result<Option<Self::Output>, HandlerError> {
        for flavor in self.flavors() {
            if flavor == requested {
                return self.content_for_flavor(flavor, source).map(Some);
            }
        }
        Ok(None)
    }
}

/// `DynContentHandler` 为对象层提供内容处理能力的对象安全接口。
///
/// # 设计初衷（Why）
/// - 注册中心需要存放多种实现的 trait 对象，在不知道具体 `Output` 类型的情况下完成分发；
/// - 与泛型 [`ContentHandler`] 在功能上保持等价，差异仅在于类型擦除与运行时下转型。
///
/// # 契约说明（What）
/// - **后置条件**：成功解码后，调用方需按双方约定的类型信息 `downcast`（见
///   [`downcast_content`]）；
/// - **性能权衡**：相较泛型层额外引入一次虚表跳转与一次装箱堆分配。
pub trait DynContentHandler: Send + Sync + 'static + Sealed {
    /// 返回处理器支持的 flavor 固定有序列表。
    fn flavors(&self) -> &[FlavorDescriptor];

    /// 对象安全的自然类型解码入口。
    fn content_dyn(
        &self,
        source: &dyn ContentSource,
    ) -> crate::Result<Box<dyn Any + Send + Sync>, HandlerError>;

    /// 对象安全的按 flavor 解码入口。
    fn content_for_flavor_dyn(
        &self,
        flavor: &FlavorDescriptor,
        source: &dyn ContentSource,
    ) -> crate::Result<Box<dyn Any + Send + Sync>, HandlerError>;

    /// 对象安全的“匹配 + 分发”入口，语义与泛型层完全一致。
    fn matching_content_dyn(
        &self,
        requested: &FlavorDescriptor,
        source: &dyn ContentSource,
    ) -> crate::Result<Option<Box<dyn Any + Send + Sync>>, HandlerError>;
}

/// `TypedHandlerAdapter` 将泛型 [`ContentHandler`] 装箱为对象安全的 [`DynContentHandler`]。
///
/// # 设计初衷（Why）
/// - 让注册中心可以统一管理强类型实现，同时保留泛型层直连的零成本路径；
/// - 桥接方向固定为泛型 → 对象，对象层不反向还原泛型。
///
/// # 契约说明（What）
/// - **后置条件**：解码产物被重新装箱为 `Box<dyn Any + Send + Sync>`，由调用方再度下转型；
/// - 适配器自身无状态，线程安全性完全继承内部实现。
pub struct TypedHandlerAdapter<H>
where
    H: ContentHandler,
{
    inner: H,
}

impl<H> TypedHandlerAdapter<H>
where
    H: ContentHandler,
{
    /// 使用给定的泛型实现构造适配器。
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    /// 取回内部泛型实现。
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H> DynContentHandler for TypedHandlerAdapter<H>
where
    H: ContentHandler,
{
    fn flavors(&self) -> &[FlavorDescriptor] {
        self.inner.flavors()
    }

    fn content_dyn(
        &self,
        source: &dyn ContentSource,
    ) -> crate::Result<Box<dyn Any + Send + Sync>, HandlerError> {
        self.inner
            .content(source)
            .map(|output| Box::new(output) as Box<dyn Any + Send + Sync>)
    }

    fn content_for_flavor_dyn(
        &self,
        flavor: &FlavorDescriptor,
        source: &dyn ContentSource,
    ) -> crate::Result<Box<dyn Any + Send + Sync>, HandlerError> {
        self.inner
            .content_for_flavor(flavor, source)
            .map(|output| Box::new(output) as Box<dyn Any + Send + Sync>)
    }

    fn matching_content_dyn(
        &self,
        requested: &FlavorDescriptor,
        source: &dyn ContentSource,
    ) -> crate::Result<Option<Box<dyn Any + Send + Sync>>, HandlerError> {
        Ok(self
            .inner
            .matching_content(requested, source)?
            .map(|output| Box::new(output) as Box<dyn Any + Send + Sync>))
    }
}

/// 将对象层解码产物还原为具体类型。
///
/// # 契约说明（What）
/// - **前置条件**：`T` 必须与产出该内容的处理器约定的 `Output` 类型一致；
/// - 类型不匹配时返回 [`codes::CONTENT_TYPE_MISMATCH`] 错误，消息中带上期望的类型名。
pub fn downcast_content<T: Any>(
    content: Box<dyn Any + Send + Sync>,
) -> crate::Result<T, HandlerError> {
    content.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        HandlerError::new(
            codes::CONTENT_TYPE_MISMATCH,
            format!(
                "期待类型 `{}`，实际收到不兼容类型",
                core::any::type_name::<T>(),
            ),
        )
    })
}
