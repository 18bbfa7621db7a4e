//! # 解码与裁剪流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 方形 PNG”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 读取 header 尺寸并按像素/内存上限快速拒绝
//! 2. 完整解码
//! 3. 计算裁剪窗口：边长 `min(w, h)`，水平居中、垂直锚定顶部
//! 4. 裁剪并编码为无损 PNG，产出 Data URL 形式的结果

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{GenericImageView, ImageReader};

use super::source::{CroppedResult, SourceFile};
use super::{CropConfig, CropError, CropHandler};

/// 计算方形裁剪窗口。
///
/// 返回 `(size, offset_x, offset_y)`：
/// - `size = min(w, h)`
/// - `offset_x = (w - size) / 2`（整数下取整，水平居中）
/// - `offset_y = 0`（垂直锚定顶部：竖图的主体通常靠上，例如人像的面部）
pub(crate) fn crop_window(width: u32, height: u32) -> (u32, u32, u32) {
    let size = width.min(height);
    (size, (width - size) / 2, 0)
}

impl CropHandler {
    /// 将源文件解码并裁剪为方形 PNG 结果。
    pub(crate) fn decode_and_crop(
        &self,
        source: SourceFile,
        config: &CropConfig,
    ) -> Result<CroppedResult, CropError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&source.bytes)?;
        self.validate_pixel_limits(config, header_width, header_height)?;
        self.validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&source.bytes)
            .map_err(|e| CropError::Decode(format!("图片解码失败：{}", e)))?;

        let (raw_width, raw_height) = decoded.dimensions();
        self.validate_pixel_limits(config, raw_width, raw_height)?;
        self.validate_decoded_memory_limits(config, raw_width, raw_height)?;

        let (size, offset_x, offset_y) = crop_window(raw_width, raw_height);
        let cropped = decoded.crop_imm(offset_x, offset_y, size, size);

        let mut png_bytes = Vec::new();
        cropped
            .write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
            .map_err(|e| CropError::Encode(format!("PNG 编码失败：{}", e)))?;

        log::info!(
            "✂️ 裁剪成功 - 文件: {} 原始尺寸: {}x{} 输出尺寸: {}x{} 偏移: ({}, {})",
            source.name,
            raw_width,
            raw_height,
            size,
            size,
            offset_x,
            offset_y
        );

        Ok(CroppedResult {
            source_file_name: source.name,
            data_url: format!(
                "data:image/png;base64,{}",
                general_purpose::STANDARD.encode(&png_bytes)
            ),
            width: size,
            height: size,
        })
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), CropError> {
        let cursor = Cursor::new(bytes);
        let reader = ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| CropError::Decode(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| CropError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        &self,
        config: &CropConfig,
        width: u32,
        height: u32,
    ) -> Result<(), CropError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| CropError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(CropError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        &self,
        config: &CropConfig,
        width: u32,
        height: u32,
    ) -> Result<(), CropError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| CropError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(CropError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}
