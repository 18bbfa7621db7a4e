//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线产物”解耦：
//! - `SourceFile` 表示一次上传的命名二进制文件（含声明的媒体类型）
//! - `CroppedResult` 表示裁剪完成、可预览可导出的最终结果

use serde::{Deserialize, Serialize};

/// 上传的源文件。
///
/// `bytes` 由 `loader` 从 IPC 载荷（Data URL 或纯 Base64）解析得到，
/// 仅在解码期间持有，不进入结果列表。
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// 原始文件名（含扩展名），仅用于结果命名，允许重复。
    pub name: String,
    /// 前端声明的媒体类型（如 `image/png`），在解码前校验。
    pub media_type: String,
    /// 原始文件字节。
    pub bytes: Vec<u8>,
}

/// 方形裁剪结果。
///
/// 不变量：`width == height == min(源宽, 源高)`。
/// 创建后不可变，按上传顺序保存在会话结果列表中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CroppedResult {
    /// 源文件名，导出时加 `cropped-` 前缀。
    pub source_file_name: String,
    /// PNG 字节的 Data URL（`data:image/png;base64,...`），前端直接预览。
    pub data_url: String,
    /// 输出宽度（像素）。
    pub width: u32,
    /// 输出高度（像素），恒等于宽度。
    pub height: u32,
}
