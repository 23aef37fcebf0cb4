//! 内容源契约：外部持有的“类型标注 + 字节流”提供方。
//!
//! # 设计背景（Why）
//! - 解码器不应关心字节从哪里来（文件、网络、内存），只需要一个带类型标注的只读入口；
//! - 源的所有权始终归宿主所有：处理器**只读取，不关闭、不改写**。
//!
//! # 契约说明（What）
//! - [`ContentSource::read_all`] 一次性返回完整负载，读取失败以 [`codes::SOURCE_READ`]
//!   （或语义更具体的码值）上报；
//! - 并发语义：处理器自身无状态，跨线程并发调用的安全性由源实现的独立读取能力保证。

use alloc::{borrow::Cow, vec::Vec};

use crate::error::HandlerError;
use crate::sealed::Sealed;

/// `ContentSource` 抽象任意可读内容源。
///
/// # 设计背景（Why）
/// - 将“字节获取”与“类型化解码”解耦：缓冲策略、超时与取消都属于源实现，不属于本契约层。
///
/// # 契约说明（What）
/// - **`content_type`**：返回源自带的媒体类型标注（原始字符串，未经解析）；
/// - **`name`**：可选的展示名（文件名、附件名），默认缺席；
/// - **`read_all`**：一次性读出完整负载。读取是全有或全无的：失败时不提供部分结果。
/// - **前置条件**：实现必须支持重复、相互独立的读取；
/// - **后置条件**：调用 `read_all` 不会消耗或关闭源。
///
/// # 风险提示（Trade-offs）
/// - 一次性读取意味着超大负载会整体驻留内存；流式场景应在源实现侧分片，或在上层另设协议。
pub trait ContentSource: Send + Sync + Sealed {
    /// 返回源自带的媒体类型标注。
    fn content_type(&self) -> &str;

    /// 返回可选的展示名。
    fn name(&self) -> Option<&str> {
        None
    }

    /// 一次性读出完整负载字节。
    fn read_all(&self) -> crate::Result<Vec<u8>, HandlerError>;
}

/// `BytesSource` 是最小的内存内容源实现。
///
/// # 设计背景（Why）
/// - 单元测试与“负载已在内存中”的生产场景（如从消息队列取出的报文体）都需要现成的源实现，
///   避免各处重复定义同构结构体。
///
/// # 契约说明（What）
/// - 负载与类型标注均采用 `Cow`，静态字面量零拷贝，动态数据只在构造时分配一次；
/// - `read_all` 每次返回独立副本，天然满足“重复、独立读取”的契约。
#[derive(Clone, Debug)]
pub struct BytesSource {
    content_type: Cow<'static, str>,
    name: Option<Cow<'static, str>>,
    data: Cow<'static, [u8]>,
}

impl BytesSource {
    /// 基于类型标注与负载构造内存源。
    pub fn new(
        content_type: impl Into<Cow<'static, str>>,
        data: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            name: None,
            data: data.into(),
        }
    }

    /// 附加展示名并返回自身。
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl ContentSource for BytesSource {
    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn read_all(&self) -> crate::Result<Vec<u8>, HandlerError> {
        Ok(self.data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_source_supports_repeated_reads() {
        // Why: 契约要求重复读取相互独立，处理器可能在匹配失败后再次尝试。
        let source = BytesSource::new("text/plain", b"hi".as_slice()).with_name("greeting.txt");
        assert_eq!(source.content_type(), "text/plain");
        assert_eq!(source.name(), Some("greeting.txt"));
        let first = source.read_all().expect("首次读取成功");
        let second = source.read_all().expect("再次读取成功");
        assert_eq!(first, b"hi");
        assert_eq!(first, second);
    }
}
