//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载裁剪链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//! `code()` / `stage()` 供命令层组装结构化错误，前端据此做展示与埋点。

/// 裁剪链路统一错误类型。
///
/// 该类型会在命令层被转换为 `CropCommandError`，最终透传给前端。
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    /// 声明的媒体类型不是图片，在任何解码尝试之前拒绝。
    #[error("输入类型错误：{0}")]
    InvalidInput(String),

    /// 图片字节无法解码（由 image 库的错误透传而来）。
    #[error("解码错误：{0}")]
    Decode(String),

    /// PNG 编码失败。
    #[error("编码错误：{0}")]
    Encode(String),

    /// zip 打包失败。
    #[error("打包错误：{0}")]
    Archive(String),

    /// 超出像素 / 内存 / 体积限制。
    #[error("资源限制：{0}")]
    ResourceLimit(String),

    /// 内部异常（任务调度失败、锁中毒等）。
    #[error("内部错误：{0}")]
    Internal(String),
}

impl CropError {
    /// 稳定错误码，供前端按类别处理。
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::Decode(_) => "E_DECODE",
            Self::Encode(_) => "E_ENCODE",
            Self::Archive(_) => "E_ARCHIVE",
            Self::ResourceLimit(_) => "E_RESOURCE_LIMIT",
            Self::Internal(_) => "E_INTERNAL",
        }
    }

    /// 出错阶段，用于日志与诊断。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "validate",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
            Self::Archive(_) => "archive",
            Self::ResourceLimit(_) => "limit",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<CropError> for String {
    /// 兼容部分仍使用字符串错误的调用点。
    fn from(error: CropError) -> Self {
        error.to_string()
    }
}
