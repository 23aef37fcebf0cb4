use alloc::{format, string::String, vec::Vec};

use mimosa_handlers::codes;
use mimosa_handlers::{ContentHandler, ContentSource, FlavorDescriptor, HandlerError, MimeType};

/// 纯文本内容处理器，实现 `mimosa-core` 的泛型 [`ContentHandler`] 契约。
///
/// # 设计动机（Why）
/// - 文本是内容处理器家族的基准成员：解码路径覆盖“读源 → 选字符集 → 校验字节”的完整分支；
/// - 单 flavor 声明直接沿用契约的默认分发策略，无需覆写 `content_for_flavor`。
///
/// # 行为概览（How）
/// - `content`：一次性读出负载，从**内容源**的类型标注中取 `charset=` 参数选择字符集解码；
/// - 类型标注缺失参数或无法解析时回退 UTF-8，与处理器家族“默认字符集兜底”的惯例一致；
/// - 声明 flavor 固定为 `text/plain; charset=utf-8`，可直接注册到 `HandlerRegistry`。
///
/// # 契约说明（What）
/// - **产物类型**：`String`，所有权转移给调用方；
/// - **前置条件**：flavor 匹配已由契约层完成，本实现不重复校验源类型；
/// - **后置条件**：非法字节序列以 [`codes::CONTENT_DECODE`] 上报，未知字符集以
///   [`codes::CHARSET_UNSUPPORTED`] 上报，读源失败原样传播。
///
/// # 权衡与风险（Trade-offs）
/// - 仅支持 UTF-8 / US-ASCII / ISO-8859-1 三种字符集；更大范围的转码属于外部协作者；
/// - ISO-8859-1 解码按单字节到码点直映射实现，不存在失败分支。
#[derive(Debug, Clone)]
pub struct TextHandler {
    flavors: [FlavorDescriptor; 1],
}

impl TextHandler {
    /// 构建新的纯文本处理器实例。
    ///
    /// # 教案式说明
    /// - **Why**：封装 flavor 声明，避免调用方重复填写媒体类型与标签；
    /// - **What**：返回的实例除固定 flavor 外无状态，可安全在多线程中共享。
    pub fn new() -> Self {
        Self {
            flavors: [FlavorDescriptor::new(
                MimeType::new("text", "plain").with_parameter("charset", "utf-8"),
                "plain text",
            )],
        }
    }

    /// 从内容源的类型标注中解析目标字符集，缺失或不可解析时回退 UTF-8。
    fn charset_of(source: &dyn ContentSource) -> String {
        MimeType::parse(source.content_type())
            .ok()
            .and_then(|mime| mime.parameter("charset").map(str::to_ascii_lowercase))
            .unwrap_or_else(|| String::from("utf-8"))
    }

    fn decode(charset: &str, bytes: Vec<u8>) -> mimosa_core::Result<String, HandlerError> {
        match charset {
            "utf-8" | "utf8" => String::from_utf8(bytes).map_err(|err| {
                HandlerError::new(
                    codes::CONTENT_DECODE,
                    format!("text payload is not valid UTF-8: {err}"),
                )
            }),
            "us-ascii" | "ascii" => {
                if let Some(position) = bytes.iter().position(|byte| !byte.is_ascii()) {
                    return Err(HandlerError::new(
                        codes::CONTENT_DECODE,
                        format!("non-ASCII byte at offset {position} in us-ascii payload"),
                    ));
                }
                // 合法 ASCII 必然是合法 UTF-8，此处不会再失败。
                String::from_utf8(bytes).map_err(|err| {
                    HandlerError::new(codes::CONTENT_DECODE, format!("{err}"))
                })
            }
            "iso-8859-1" | "latin-1" | "latin1" => {
                Ok(bytes.iter().map(|&byte| char::from(byte)).collect())
            }
            other => Err(HandlerError::new(
                codes::CHARSET_UNSUPPORTED,
                format!("charset `{other}` is not supported by the text handler"),
            )),
        }
    }
}

impl Default for TextHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHandler for TextHandler {
    type Output = String;

    fn flavors(&self) -> &[FlavorDescriptor] {
        &self.flavors
    }

    fn content(&self, source: &dyn ContentSource) -> mimosa_core::Result<String, HandlerError> {
        let bytes = source.read_all()?;
        let charset = Self::charset_of(source);
        Self::decode(&charset, bytes)
    }
}
