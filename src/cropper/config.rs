//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `CropConfig`，保证运行时行为可观测、可调整、可测试。
//! `ExportSettings` 承载前端设置面板收集的导出选项，由后端统一存取与校验。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的保守限制。
//! - `ExportSettings::validate` 在写入前做范围检查，拒绝非法组合。
//! - 注意：裁剪流水线当前并不消费 `ExportSettings` 的任何字段，
//!   输出固定为无损 PNG、尺寸 `min(w, h)`。

use serde::{Deserialize, Serialize};

use super::CropError;

/// 裁剪处理配置。
///
/// 字段覆盖了载荷解析与解码两个阶段的资源上限。
#[derive(Debug, Clone)]
pub struct CropConfig {
    /// 单个文件解码前允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
        }
    }
}

/// 导出设置（面向前端设置面板）。
///
/// 由 `set_export_settings` / `get_export_settings` 命令存取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// 有损格式的输出质量（1~100）。
    pub quality: u8,
    /// 输出单边最大尺寸（像素）。
    pub max_size: u32,
    /// 目标格式标识（png / jpeg / webp）。
    pub format: String,
    /// 是否保留元数据（EXIF 等）。
    pub maintain_metadata: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            quality: 90,
            max_size: 1920,
            format: "png".to_string(),
            maintain_metadata: true,
        }
    }
}

impl ExportSettings {
    /// 写入前的范围校验。
    pub(crate) fn validate(&self) -> Result<(), CropError> {
        if !(1..=100).contains(&self.quality) {
            return Err(CropError::InvalidInput(format!(
                "quality 必须在 1~100 之间（收到：{}）",
                self.quality
            )));
        }

        if !(16..=16_384).contains(&self.max_size) {
            return Err(CropError::InvalidInput(format!(
                "max_size 必须在 16~16384 像素之间（收到：{}）",
                self.max_size
            )));
        }

        match self.format.trim().to_lowercase().as_str() {
            "png" | "jpeg" | "webp" => Ok(()),
            other => Err(CropError::InvalidInput(format!(
                "未知导出格式：{}（可选：png / jpeg / webp）",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_pass_validation() {
        let settings = ExportSettings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn settings_reject_out_of_range_quality() {
        let mut settings = ExportSettings::default();
        settings.quality = 0;
        assert!(matches!(settings.validate(), Err(CropError::InvalidInput(_))));

        settings.quality = 101;
        assert!(matches!(settings.validate(), Err(CropError::InvalidInput(_))));
    }

    #[test]
    fn settings_reject_unknown_format() {
        let mut settings = ExportSettings::default();
        settings.format = "bmp".to_string();
        assert!(matches!(settings.validate(), Err(CropError::InvalidInput(_))));
    }

    #[test]
    fn settings_accept_mixed_case_format() {
        let mut settings = ExportSettings::default();
        settings.format = " PNG ".to_string();
        assert!(settings.validate().is_ok());
    }
}
