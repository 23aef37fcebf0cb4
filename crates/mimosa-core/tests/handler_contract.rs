//! 处理器契约的端到端回归：从公共 API 视角验证“匹配 + 分发”语义。
//!
//! # 教案说明（Why）
//! - 单元测试覆盖各模块内部分支，此处以外部使用者的姿态组合契约：自定义处理器 →
//!   对象层适配 → 注册中心分发 → 类型还原；
//! - 同时回归分发语义的三条红线：无匹配是 `Ok(None)`、解码错误原样传播、参数不敏感等值。

use mimosa_core::{
    BytesSource, ContentHandler, ContentSource, FlavorDescriptor, HandlerError, HandlerRegistry,
    MimeType, TypedHandlerAdapter, codes, downcast_content,
};

/// 契约测试专用的最小文本处理器：单 flavor，默认分发策略。
struct PlainTextStub {
    flavors: Vec<FlavorDescriptor>,
}

impl PlainTextStub {
    fn new() -> Self {
        Self {
            flavors: vec![FlavorDescriptor::new(
                MimeType::new("text", "plain").with_parameter("charset", "utf-8"),
                "plain text",
            )],
        }
    }
}

impl ContentHandler for PlainTextStub {
    type Output = String;

    fn flavors(&self) -> &[FlavorDescriptor] {
        &self.flavors
    }

    fn content(&self, source: &dyn ContentSource) -> mimosa_core::Result<String, HandlerError> {
        let bytes = source.read_all()?;
        String::from_utf8(bytes).map_err(|err| {
            HandlerError::new(
                codes::CONTENT_DECODE,
                format!("text payload is not valid UTF-8: {err}"),
            )
        })
    }
}

fn request(mime_text: &str) -> FlavorDescriptor {
    FlavorDescriptor::from_mime(MimeType::parse(mime_text).expect("请求类型应合法"))
}

#[test]
fn parameterized_request_matches_bare_declaration() {
    // 规约示例：声明 `text/plain; charset=utf-8`，请求 `text/plain; charset=us-ascii`，
    // 字节 `"hi"` 应解码为 `"hi"`。
    let handler = PlainTextStub::new();
    let source = BytesSource::new("text/plain; charset=us-ascii", b"hi".as_slice());
    let decoded = handler
        .matching_content(&request("text/plain; charset=us-ascii"), &source)
        .expect("解码成功");
    assert_eq!(decoded.as_deref(), Some("hi"));
}

#[test]
fn unsupported_request_is_absent() {
    // 规约示例：同一处理器对 `image/png` 请求返回缺席，而非错误。
    let handler = PlainTextStub::new();
    let source = BytesSource::new("text/plain", b"hi".as_slice());
    let outcome = handler
        .matching_content(&request("image/png"), &source)
        .expect("不应报错");
    assert!(outcome.is_none());
}

#[test]
fn registry_round_trips_ascii_payload() {
    // 规约性质：解码后经调用方协作者（`String::into_bytes`）重新编码，应精确还原原始字节。
    let payload = b"plain ascii payload".as_slice();
    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(TypedHandlerAdapter::new(PlainTextStub::new())));

    let source = BytesSource::new("text/plain; charset=utf-8", payload);
    let decoded = registry
        .content_from(&source)
        .expect("分发成功")
        .expect("应命中文本处理器");
    let text: String = downcast_content(decoded).expect("类型还原成功");
    assert_eq!(text.into_bytes(), payload);
}

#[test]
fn decode_failure_is_distinguishable_from_no_match() {
    let handler = PlainTextStub::new();

    let bad_source = BytesSource::new("text/plain", vec![0xFFu8, 0x00]);
    let err = handler
        .matching_content(&request("text/plain"), &bad_source)
        .expect_err("非法负载应报错");
    assert_eq!(err.code(), codes::CONTENT_DECODE);

    let good_source = BytesSource::new("text/plain", b"ok".as_slice());
    assert!(
        handler
            .matching_content(&request("application/json"), &good_source)
            .expect("无匹配不应报错")
            .is_none()
    );
}
