//! 注册中心：内容类型 → 解码例程的有序映射。
//!
//! # 设计背景（Why）
//! - 宿主框架通常在组装阶段注册一组处理器，运行期只按内容源的类型标注查找并分发；
//! - 与处理器契约保持同一语义：声明/注册顺序即优先级，首个命中即生效。
//!
//! # 逻辑解析（How）
//! - 注册阶段持 `&mut self` 追加对象层处理器，冻结后（不再注册）实例只读，可放入 `Arc`
//!   跨线程共享；
//! - 分发时先解析源的类型标注，再按注册顺序逐一调用对象层的“匹配 + 分发”入口。
//!
//! # 风险提示（Trade-offs）
//! - 查找是对处理器及其 flavor 列表的线性扫描；注册集合按场景定位在个位数规模，换取实现
//!   与语义的极简。若未来出现大规模注册需求，可在不破坏 API 的前提下内置按本质字段的索引。

use alloc::{boxed::Box, vec::Vec};
use core::any::Any;

use crate::error::HandlerError;
use crate::flavor::{FlavorDescriptor, MimeType};
use crate::handler::DynContentHandler;
use crate::source::ContentSource;

/// `HandlerRegistry` 按注册顺序维护一组对象层处理器。
///
/// # 契约说明（What）
/// - **前置条件**：注册应在组装阶段完成；注册完成后实例不再变化，满足 `Send + Sync` 共享条件；
/// - **后置条件**：[`content_from`](Self::content_from) 无匹配返回 `Ok(None)`，解码错误原样传播；
///   源的类型标注无法解析属于调用错误，以 [`codes::CONTENT_TYPE_MALFORMED`](crate::codes::CONTENT_TYPE_MALFORMED)
///   上报而非静默当作无匹配。
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn DynContentHandler>>,
}

impl HandlerRegistry {
    /// 创建空注册中心。
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// 追加一个对象层处理器，返回自身以便链式注册。
    ///
    /// 允许重复注册支持相同 flavor 的处理器：分发时先注册者胜出。
    pub fn register(&mut self, handler: Box<dyn DynContentHandler>) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// 返回已注册处理器数量。
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// 是否尚无任何注册。
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// 查找首个声明了匹配 flavor 的处理器。
    pub fn lookup(&self, mime: &MimeType) -> Option<&dyn DynContentHandler> {
        self.handlers
            .iter()
            .map(|handler| handler.as_ref())
            .find(|handler| handler.flavors().iter().any(|flavor| flavor.mime() == mime))
    }

    /// 按内容源的类型标注分发解码。
    ///
    /// # 契约说明（What）
    /// - 解析 `source.content_type()` 构造请求 flavor，再按注册顺序逐一尝试各处理器的
    ///   “匹配 + 分发”入口；
    /// - 首个命中返回 `Ok(Some(..))`；全部未命中返回 `Ok(None)`；解析失败与解码失败均为错误。
    pub fn content_from(
        &self,
        source: &dyn ContentSource,
    ) -> crate::Result<Option<Box<dyn Any + Send + Sync>>, HandlerError> {
        let mime = MimeType::parse(source.content_type())?;
        let requested = FlavorDescriptor::from_mime(mime);
        for handler in &self.handlers {
            if let Some(content) = handler.matching_content_dyn(&requested, source)? {
                return Ok(Some(content));
            }
        }
        Ok(None)
    }
}
