//! Flavor 描述符：内容协商的最小识别单元。
//!
//! # 设计背景（Why）
//! - 参考桌面数据交换框架（clipboard / drag-and-drop）与 MIME 消息体系的协商语义：
//!   处理器声明自己支持的 flavor 列表，调用方以 flavor 请求解码；
//! - 等值语义是本模块唯一的硬性不变量：**只比较媒体类型的本质字段**（主类型 + 子类型），
//!   忽略 `charset=` 这类附带参数，保证 `text/plain` 与 `text/plain; charset=utf-8` 互相匹配。
//!
//! # 结构概览（What）
//! - [`MimeType`]：解析后的媒体类型，携带参数但不参与等值比较；
//! - [`FlavorDescriptor`]：媒体类型 + 人类可读标签，处理器初始化时一次性构造，之后不可变。
//!
//! # 实现策略（How）
//! - 主类型、子类型与参数名在构造/解析阶段统一折叠为小写，等值比较因此退化为普通字符串比较；
//! - 处理器侧通过组件式 Builder（[`MimeType::new`] + [`MimeType::with_parameter`]）无失败地
//!   构造常量 flavor；运行时字符串（内容源的类型标注、外部请求）走 [`MimeType::parse`]。
//!
//! # 风险提示（Trade-offs）
//! - 未实现 `text/*` 通配匹配：协商契约只认完全相等的本质字段，通配需求由上层自行展开；
//! - 参数值保留原始大小写，语义敏感的参数（如 `charset`）由消费方按各自规范做大小写折叠。

use alloc::{
    borrow::{Cow, ToOwned},
    format,
    string::String,
    vec::Vec,
};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::error::{HandlerError, codes};

/// 将 token 折叠为 ASCII 小写，纯小写输入不触发分配。
fn fold_token(value: Cow<'static, str>) -> Cow<'static, str> {
    if value.bytes().any(|byte| byte.is_ascii_uppercase()) {
        Cow::Owned(value.to_ascii_lowercase())
    } else {
        value
    }
}

/// RFC 2045 意义下的 token 校验：非空、可见 ASCII 且不含 tspecials。
fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| {
            byte.is_ascii_graphic()
                && !matches!(
                    byte,
                    b'(' | b')'
                        | b'<'
                        | b'>'
                        | b'@'
                        | b','
                        | b';'
                        | b':'
                        | b'\\'
                        | b'"'
                        | b'/'
                        | b'['
                        | b']'
                        | b'?'
                        | b'='
                )
        })
}

/// `MimeType` 以 IANA `media-type` 约定描述负载语义，并携带可选参数。
///
/// # 设计背景（Why）
/// - 行业头部框架均以标准化 MIME 类型标识负载语义，可与各语言生态兼容；
/// - 通过 `Cow<'static, str>` 兼容静态常量与运行时解析出的动态类型，避免过度复制。
///
/// # 逻辑解析（How）
/// - [`new`](Self::new) 从主类型/子类型组件无失败地构造，供处理器声明常量 flavor；
/// - [`parse`](Self::parse) 解析 `type/subtype; name=value` 形态的运行时字符串，失败时返回
///   [`codes::CONTENT_TYPE_MALFORMED`]；
/// - 等值与哈希**只覆盖本质字段**（主类型 + 子类型），参数完全不参与，`Eq` 与 `Hash` 保持一致。
///
/// # 契约说明（What）
/// - **前置条件**：组件式构造不做合法性校验（与解析入口不同），调用方应传入符合 token 约定的
///   小写或可折叠字符串；
/// - **后置条件**：实例构造后不可变，可安全跨线程共享并长期缓存于注册表。
///
/// # 风险提示（Trade-offs）
/// - 参数以声明顺序保存在 `Vec` 中；按名查找是线性扫描，参数通常只有一两个，不构成负担。
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MimeType {
    primary: Cow<'static, str>,
    sub: Cow<'static, str>,
    parameters: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl MimeType {
    /// 从主类型与子类型组件构造，不做校验、不会失败。
    pub fn new(primary: impl Into<Cow<'static, str>>, sub: impl Into<Cow<'static, str>>) -> Self {
        Self {
            primary: fold_token(primary.into()),
            sub: fold_token(sub.into()),
            parameters: Vec::new(),
        }
    }

    /// 追加一个参数并返回自身，参数名折叠为小写，参数值保留原样。
    pub fn with_parameter(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.parameters.push((fold_token(name.into()), value.into()));
        self
    }

    /// 解析运行时媒体类型字符串。
    ///
    /// # 契约说明（What）
    /// - **输入**：`type/subtype` 起始，后接零个或多个 `; name=value` 参数段；参数值允许双引号包裹，
    ///   解析时去除引号；空白与空参数段被容忍并忽略。
    /// - **返回**：成功时主类型、子类型与参数名均已折叠为小写；失败时返回
    ///   [`codes::CONTENT_TYPE_MALFORMED`] 错误，消息中带上原始文本以便排障。
    /// - **前置条件**：调用方无需预清洗输入；**后置条件**：返回值满足与组件式构造相同的不变量。
    pub fn parse(text: &str) -> crate::Result<Self, HandlerError> {
        let mut segments = text.split(';');
        let essence = segments.next().unwrap_or("").trim();
        let Some((primary, sub)) = essence.split_once('/') else {
            return Err(HandlerError::new(
                codes::CONTENT_TYPE_MALFORMED,
                format!("media type `{text}` is missing the `/` separator"),
            ));
        };
        if !is_token(primary) || !is_token(sub) {
            return Err(HandlerError::new(
                codes::CONTENT_TYPE_MALFORMED,
                format!("media type `{text}` contains an invalid type token"),
            ));
        }

        let mut mime = Self {
            primary: Cow::Owned(primary.to_ascii_lowercase()),
            sub: Cow::Owned(sub.to_ascii_lowercase()),
            parameters: Vec::new(),
        };

        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                // 容忍 `text/plain;` 这类遗留写法产生的空参数段。
                continue;
            }
            let Some((name, value)) = segment.split_once('=') else {
                return Err(HandlerError::new(
                    codes::CONTENT_TYPE_MALFORMED,
                    format!("parameter segment `{segment}` in `{text}` is missing `=`"),
                ));
            };
            let name = name.trim();
            if !is_token(name) {
                return Err(HandlerError::new(
                    codes::CONTENT_TYPE_MALFORMED,
                    format!("parameter name `{name}` in `{text}` is not a valid token"),
                ));
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(value);
            mime.parameters
                .push((Cow::Owned(name.to_ascii_lowercase()), Cow::Owned(value.to_owned())));
        }

        Ok(mime)
    }

    /// 返回主类型（小写）。
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// 返回子类型（小写）。
    pub fn sub(&self) -> &str {
        &self.sub
    }

    /// 返回 `type/subtype` 形态的本质字符串。
    pub fn essence(&self) -> String {
        format!("{}/{}", self.primary, self.sub)
    }

    /// 按名查找参数值，参数名不区分大小写。
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref())
    }

    /// 按声明顺序遍历参数。
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.parameters
            .iter()
            .map(|(name, value)| (name.as_ref(), value.as_ref()))
    }
}

impl PartialEq for MimeType {
    fn eq(&self, other: &Self) -> bool {
        // 不变量：等值只看本质字段，参数是附带信息。
        self.primary == other.primary && self.sub == other.sub
    }
}

impl Eq for MimeType {}

impl Hash for MimeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 与 `PartialEq` 保持一致：参数不参与哈希。
        self.primary.hash(state);
        self.sub.hash(state);
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.primary, self.sub)?;
        for (name, value) in &self.parameters {
            write!(f, "; {name}={value}")?;
        }
        Ok(())
    }
}

/// `FlavorDescriptor` 将媒体类型与人类可读标签捆绑为处理器的协商单元。
///
/// # 设计背景（Why）
/// - 处理器在初始化阶段一次性声明自己支持的 flavor 列表，之后每次调用零分配复用；
/// - 标签仅面向日志与用户界面展示，与协商语义无关。
///
/// # 契约说明（What）
/// - **等值语义**：完全委托给 [`MimeType`] 的本质字段比较，标签不参与；
/// - **后置条件**：实例不可变，可安全跨线程共享。
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlavorDescriptor {
    mime: MimeType,
    label: Cow<'static, str>,
}

impl FlavorDescriptor {
    /// 基于媒体类型与标签构造描述符。
    pub fn new(mime: MimeType, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            mime,
            label: label.into(),
        }
    }

    /// 以媒体类型的本质字符串充当标签的便捷构造，供运行时请求侧使用。
    pub fn from_mime(mime: MimeType) -> Self {
        let label = Cow::Owned(mime.essence());
        Self { mime, label }
    }

    /// 返回媒体类型。
    pub fn mime(&self) -> &MimeType {
        &self.mime
    }

    /// 返回人类可读标签。
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for FlavorDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.mime == other.mime
    }
}

impl Eq for FlavorDescriptor {}

impl Hash for FlavorDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mime.hash(state);
    }
}

impl fmt::Display for FlavorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use proptest::prelude::*;

    #[test]
    fn parse_normalizes_case_and_keeps_parameters() {
        // Why: 解析入口必须折叠类型与参数名大小写，否则等值比较会依赖调用方书写习惯。
        let mime = MimeType::parse("Text/PLAIN; Charset=US-ASCII").expect("合法类型应解析成功");
        assert_eq!(mime.primary(), "text");
        assert_eq!(mime.sub(), "plain");
        assert_eq!(mime.parameter("charset"), Some("US-ASCII"));
        assert_eq!(mime.essence(), "text/plain");
    }

    #[test]
    fn parse_unquotes_parameter_values() {
        let mime = MimeType::parse("text/plain; charset=\"utf-8\"").expect("引号值应解析成功");
        assert_eq!(mime.parameter("charset"), Some("utf-8"));
    }

    #[test]
    fn parse_tolerates_trailing_semicolon() {
        let mime = MimeType::parse("text/plain;").expect("尾分号应被容忍");
        assert_eq!(mime.parameters().count(), 0);
    }

    #[test]
    fn parse_rejects_missing_slash() {
        let err = MimeType::parse("plaintext").expect_err("缺少 `/` 应报错");
        assert_eq!(err.code(), codes::CONTENT_TYPE_MALFORMED);
    }

    #[test]
    fn parse_rejects_parameter_without_equals() {
        let err = MimeType::parse("text/plain; charset").expect_err("缺少 `=` 应报错");
        assert_eq!(err.code(), codes::CONTENT_TYPE_MALFORMED);
    }

    #[test]
    fn equality_ignores_parameters() {
        // Why: 核心不变量——`text/plain` 必须与 `text/plain; charset=utf-8` 判等，
        //      否则处理器声明的 flavor 无法匹配带参数的运行时类型标注。
        let bare = MimeType::new("text", "plain");
        let parameterized = MimeType::parse("text/plain; charset=utf-8").expect("解析成功");
        assert_eq!(bare, parameterized);
        assert_ne!(bare, MimeType::new("text", "html"));
    }

    #[test]
    fn descriptor_equality_ignores_label() {
        let left = FlavorDescriptor::new(MimeType::new("text", "plain"), "plain text");
        let right = FlavorDescriptor::new(
            MimeType::new("text", "plain").with_parameter("charset", "us-ascii"),
            "另一个标签",
        );
        assert_eq!(left, right);
    }

    #[cfg(feature = "std")]
    #[test]
    fn hash_is_consistent_with_equality() {
        // Why: 描述符可能被放入 HashMap 索引，哈希必须与参数无关的等值语义一致。
        use core::hash::BuildHasher;
        use std::collections::hash_map::RandomState;

        let state = RandomState::new();
        let bare = MimeType::new("text", "plain");
        let parameterized = MimeType::parse("text/plain; charset=utf-8").expect("解析成功");
        assert_eq!(state.hash_one(&bare), state.hash_one(&parameterized));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let mime = MimeType::new("text", "plain").with_parameter("charset", "utf-8");
        let rendered = mime.to_string();
        assert_eq!(rendered, "text/plain; charset=utf-8");
        let reparsed = MimeType::parse(&rendered).expect("Display 输出应可重新解析");
        assert_eq!(reparsed.parameter("charset"), Some("utf-8"));
    }

    proptest! {
        /// 性质：任意合法参数组合都不影响本质等值。
        #[test]
        fn parameters_never_affect_equality(
            params in proptest::collection::vec(("[a-z]{1,8}", "[A-Za-z0-9]{1,8}"), 0..4)
        ) {
            let mut text = "text/plain".to_string();
            for (name, value) in &params {
                text.push_str("; ");
                text.push_str(name);
                text.push('=');
                text.push_str(value);
            }
            let parsed = MimeType::parse(&text).expect("构造的类型串应合法");
            prop_assert_eq!(&parsed, &MimeType::new("text", "plain"));
            prop_assert_eq!(parsed.parameters().count(), params.len());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn descriptor_serde_round_trip() {
        // Why: `serde` Feature 用于配置与遥测快照，序列化必须保真参数与标签。
        let descriptor = FlavorDescriptor::new(
            MimeType::new("text", "plain").with_parameter("charset", "utf-8"),
            "plain text",
        );
        let json = serde_json::to_string(&descriptor).expect("序列化成功");
        let back: FlavorDescriptor = serde_json::from_str(&json).expect("反序列化成功");
        assert_eq!(back, descriptor);
        assert_eq!(back.label(), "plain text");
        assert_eq!(back.mime().parameter("charset"), Some("utf-8"));
    }
}
