use alloc::vec::Vec;

use mimosa_handlers::{ContentHandler, ContentSource, FlavorDescriptor, HandlerError, MimeType};

/// 不透明二进制处理器：把负载原样交给调用方。
///
/// # 设计动机（Why）
/// - `application/octet-stream` 约定负载语义由调用方自行解释，处理器层不应做任何转换；
/// - 作为注册中心的兜底成员，让“能匹配但无需解析”的负载也走统一的分发路径。
///
/// # 契约说明（What）
/// - **产物类型**：`Vec<u8>`，与源字节逐位一致；
/// - **前置条件**：无；**后置条件**：除读源失败外不产生错误。
#[derive(Debug, Clone)]
pub struct OctetStreamHandler {
    flavors: [FlavorDescriptor; 1],
}

impl OctetStreamHandler {
    /// 构建新的二进制透传处理器实例。
    pub fn new() -> Self {
        Self {
            flavors: [FlavorDescriptor::new(
                MimeType::new("application", "octet-stream"),
                "binary payload",
            )],
        }
    }
}

impl Default for OctetStreamHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHandler for OctetStreamHandler {
    type Output = Vec<u8>;

    fn flavors(&self) -> &[FlavorDescriptor] {
        &self.flavors
    }

    fn content(&self, source: &dyn ContentSource) -> mimosa_core::Result<Vec<u8>, HandlerError> {
        source.read_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimosa_handlers::BytesSource;

    fn request(mime_text: &str) -> FlavorDescriptor {
        FlavorDescriptor::from_mime(MimeType::parse(mime_text).expect("请求类型应合法"))
    }

    #[test]
    fn passes_bytes_through_unchanged() {
        // Why: 透传语义要求逐位一致，任何“顺手”的转换都是缺陷。
        let handler = OctetStreamHandler::new();
        let source = BytesSource::new("application/octet-stream", b"\x00\xFF\x10".as_slice());
        let decoded = handler
            .matching_content(&request("application/octet-stream"), &source)
            .expect("解码成功");
        assert_eq!(decoded.as_deref(), Some(b"\x00\xFF\x10".as_slice()));
    }

    #[test]
    fn foreign_flavor_is_absent() {
        let handler = OctetStreamHandler::new();
        let source = BytesSource::new("application/octet-stream", b"\x00".as_slice());
        let outcome = handler
            .matching_content(&request("text/plain"), &source)
            .expect("不应报错");
        assert!(outcome.is_none());
    }

    #[test]
    fn round_trips_exact_payload() {
        let payload = b"\x89PNG\r\n\x1a\n".as_slice();
        let handler = OctetStreamHandler::new();
        let source = BytesSource::new("application/octet-stream", payload);
        let decoded = handler.content(&source).expect("解码成功");
        assert_eq!(decoded, payload);
    }
}
