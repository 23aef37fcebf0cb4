//! 错误域：稳定错误码 + 根因链路。
//!
//! # 设计背景（Why）
//! - 内容处理链路横跨“源读取 → flavor 匹配 → 类型化解码”，不同阶段的故障需要合流为统一的
//!   错误码，便于日志与调用方分支处理。
//! - 框架需兼容 `no_std + alloc` 场景，因此不依赖 `std::error::Error`，而是复用 crate 根部定义的
//!   轻量 [`Error`](crate::Error) 抽象。
//!
//! # 契约说明（What）
//! - “请求的 flavor 不受支持”**不是**错误：契约层以 `Ok(None)` 表达缺席，本模块只承载真正的失败。
//! - 错误码 `code` 始终为 `'static` 字符串，遵循 `<域>.<语义>` 命名约定，见 [`codes`]。

use alloc::{borrow::Cow, boxed::Box};
use core::fmt;

use crate::Error;

/// 线程安全的底层原因别名，供跨线程传递错误链使用。
pub type ErrorCause = Box<dyn Error + Send + Sync + 'static>;

/// `Result` 别名，默认错误类型为 [`HandlerError`]。
pub type Result<T, E = HandlerError> = core::result::Result<T, E>;

/// `HandlerError` 表示内容处理链路中所有可观察错误的最终形态。
///
/// # 设计背景（Why）
/// - 源读取失败、负载格式非法、对象层类型不匹配等故障需要统一承载，调用方依据稳定
///   错误码做分支处理，而不是解析消息字符串。
///
/// # 逻辑解析（How）
/// - 结构体以 Builder 风格方法叠加底层原因，并通过 [`Error`] 实现暴露完整链路；
/// - 错误码 `code` 承载稳定语义；`message` 面向排障人员。
///
/// # 契约说明（What）
/// - **前置条件**：调用方必须使用 [`codes`] 模块或遵循 `<域>.<语义>` 约定的自定义码值。
/// - **后置条件**：返回的 `HandlerError` 拥有独立所有权，可安全跨线程移动（`Send + Sync + 'static`）。
///
/// # 设计取舍与风险（Trade-offs）
/// - 消息采用 `Cow<'static, str>`，静态文案零分配，动态描述才触发一次堆分配。
/// - 结构体仅负责承载信息，不执行任何格式化或指标上报逻辑；调用方需自行处理。
#[derive(Debug)]
pub struct HandlerError {
    code: &'static str,
    message: Cow<'static, str>,
    cause: Option<ErrorCause>,
}

impl HandlerError {
    /// 构造新的处理器错误。
    ///
    /// # 契约说明（What）
    /// - **输入参数**：
    ///   - `code`：遵循 `<域>.<语义>` 约定的稳定错误码；
    ///   - `message`：面向排障人员的自然语言描述，可为 `&'static str` 或堆分配字符串。
    /// - **后置条件**：`cause` 初始为空，调用方可稍后通过 [`with_cause`](Self::with_cause)
    ///   或 [`set_cause`](Self::set_cause) 填充。
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// 附带底层原因并返回新的错误。
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 为现有错误设置底层原因。
    pub fn set_cause(&mut self, cause: impl Error + Send + Sync + 'static) {
        self.cause = Some(Box::new(cause));
    }

    /// 返回稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 返回人类可读描述。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 访问底层原因（若有）。
    #[allow(unused_parens)]
    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| &**cause as &(dyn Error + 'static))
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for HandlerError {
    #[allow(unused_parens)]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause()
    }
}

/// 稳定错误码集合。
///
/// # 设计背景（Why）
/// - 错误码遵循 `<域>.<语义>` 命名约定，方便在跨组件日志中检索与聚合；
/// - 粒度保持适中：覆盖源读取、负载解码、类型系统三类高频故障即可，避免枚举过细导致
///   实现者难以判定场景。
///
/// # 契约说明（What）
/// - **使用前提**：错误码应由实现者封装进 [`HandlerError`]，并确保消息中携带完整上下文；
/// - **返回承诺**：调用方收到这些错误码后可据此分支：源故障可换源重试，负载故障应丢弃报文。
pub mod codes {
    /// 内容源的字节流无法读取。
    pub const SOURCE_READ: &str = "source.read";
    /// 负载对期望类型而言格式非法。
    pub const CONTENT_DECODE: &str = "content.decode";
    /// 内容类型字符串无法解析。
    pub const CONTENT_TYPE_MALFORMED: &str = "content.type_malformed";
    /// 对象层解码产物与期望类型不匹配。
    pub const CONTENT_TYPE_MISMATCH: &str = "content.type_mismatch";
    /// 文本处理器遇到不支持的字符集。
    pub const CHARSET_UNSUPPORTED: &str = "content.charset_unsupported";
}
