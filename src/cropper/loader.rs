//! # 载荷加载模块
//!
//! ## 设计思路
//!
//! 统一处理前端经 IPC 送达的文件载荷（Data URL / 纯 Base64），
//! 并在“尽可能早”的阶段执行输入校验：
//! - 先按 Base64 长度估算解码体积上限，超限直接拒绝，不做无谓解码。
//! - 声明的媒体类型不以 `image/` 开头时立即拒绝，不触碰字节内容。

use base64::{Engine as _, engine::general_purpose};

use super::source::SourceFile;
use super::{CropConfig, CropError, CropHandler};

/// 前端上传的单个文件载荷（IPC 入参）。
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SourceFilePayload {
    /// 原始文件名。
    pub name: String,
    /// 前端声明的媒体类型。
    pub media_type: String,
    /// 文件内容（Data URL 或纯 Base64）。
    pub data: String,
}

impl CropHandler {
    /// 将 IPC 载荷解析为 `SourceFile`。
    ///
    /// 媒体类型校验发生在 Base64 解码之前，非图片类型不消耗解码开销。
    pub(crate) fn load_source_file(
        payload: SourceFilePayload,
        config: &CropConfig,
    ) -> Result<SourceFile, CropError> {
        Self::validate_media_type(&payload.media_type)?;

        let bytes = Self::parse_base64_with_limit(&payload.data, config.max_file_size)?;

        if bytes.len() as u64 > config.max_file_size {
            return Err(CropError::ResourceLimit(format!(
                "文件体积过大：{:.2} MB（限制：{:.2} MB）",
                bytes.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(SourceFile {
            name: payload.name,
            media_type: payload.media_type,
            bytes,
        })
    }

    /// 声明类型必须以 `image/` 开头，任何解码尝试之前执行。
    pub(crate) fn validate_media_type(media_type: &str) -> Result<(), CropError> {
        if media_type.starts_with("image/") {
            Ok(())
        } else {
            Err(CropError::InvalidInput(format!(
                "不支持的媒体类型：{}（仅接受 image/*）",
                media_type
            )))
        }
    }

    /// 按 Base64 长度估算解码后体积上限（字节）。
    fn estimate_base64_decoded_upper_bound_len(base64_data: &str) -> Result<u64, CropError> {
        let len = base64_data.trim().len() as u64;
        len.checked_add(3)
            .ok_or_else(|| CropError::ResourceLimit("Base64 输入长度溢出".to_string()))?
            .checked_div(4)
            .and_then(|groups| groups.checked_mul(3))
            .ok_or_else(|| CropError::ResourceLimit("Base64 解码体积估算溢出".to_string()))
    }

    /// 解析 Base64 输入（支持 Data URL / 纯 Base64），带解码体积预检。
    fn parse_base64_with_limit(data: &str, max_file_size: u64) -> Result<Vec<u8>, CropError> {
        let normalized = data.trim();

        let base64_data = if normalized.starts_with("data:") {
            let base64_start = normalized
                .find(";base64,")
                .ok_or_else(|| CropError::InvalidInput("缺少 base64 标记".to_string()))?;
            &normalized[base64_start + 8..]
        } else {
            normalized
        };

        let estimated_len = Self::estimate_base64_decoded_upper_bound_len(base64_data)?;
        if estimated_len > max_file_size {
            return Err(CropError::ResourceLimit(format!(
                "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
                estimated_len as f64 / 1024.0 / 1024.0,
                max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        general_purpose::STANDARD
            .decode(base64_data)
            .map_err(|e| CropError::Decode(format!("Base64 解码失败：{}", e)))
    }
}
