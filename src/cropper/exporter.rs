//! # 导出模块
//!
//! ## 设计思路
//!
//! 导出只负责“构造下载载荷”：文件名 + 字节内容。
//! 保存对话框与磁盘写入由前端协作方完成，后端不决定文件落在哪里。
//!
//! ## 实现思路
//!
//! - 单文件：`cropped-<原文件名>`，内容为结果中的 PNG 字节。
//! - 批量：空列表不产生载荷；单元素与单文件导出完全一致；
//!   多元素打包为 `cropped-images.zip`，每个条目名 `cropped-<原文件名>`，
//!   Stored 方式写入（不追求压缩率，条目存在与命名正确即可）。
//! - zip 缓冲区按次构建、随载荷移出，调用之间不保留任何中间对象。

use std::io::{Cursor, Write as _};

use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::source::CroppedResult;
use super::CropError;

/// 批量归档的固定下载名。
pub(crate) const ARCHIVE_FILE_NAME: &str = "cropped-images.zip";

/// 下载载荷（IPC 出参）。
///
/// 前端拿到后弹出保存对话框并写盘。
#[derive(Debug, Clone, Serialize)]
pub struct ExportPayload {
    /// 建议保存的文件名。
    pub file_name: String,
    /// 载荷媒体类型（`image/png` 或 `application/zip`）。
    pub media_type: &'static str,
    /// 文件内容（Base64）。
    pub data_base64: String,
}

/// 导出文件名：统一加 `cropped-` 前缀。
fn export_file_name(source_file_name: &str) -> String {
    format!("cropped-{}", source_file_name)
}

/// 从结果的 Data URL 还原 PNG 字节。
fn png_bytes_of(result: &CroppedResult) -> Result<Vec<u8>, CropError> {
    let base64_data = result
        .data_url
        .split_once(";base64,")
        .map(|(_, data)| data)
        .unwrap_or(result.data_url.as_str());

    general_purpose::STANDARD
        .decode(base64_data)
        .map_err(|e| CropError::Internal(format!("结果载荷损坏，Base64 还原失败：{}", e)))
}

/// 构造单文件下载载荷。
pub(crate) fn export_single(result: &CroppedResult) -> Result<ExportPayload, CropError> {
    let bytes = png_bytes_of(result)?;

    Ok(ExportPayload {
        file_name: export_file_name(&result.source_file_name),
        media_type: "image/png",
        data_base64: general_purpose::STANDARD.encode(bytes),
    })
}

/// 构造批量下载载荷。
///
/// - 空列表 → `None`（不触发任何下载）
/// - 单元素 → 与 [`export_single`] 完全一致
/// - 多元素 → 一个 zip 归档，条目按列表顺序写入
pub(crate) fn export_all(results: &[CroppedResult]) -> Result<Option<ExportPayload>, CropError> {
    match results {
        [] => Ok(None),
        [only] => export_single(only).map(Some),
        many => {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

            for result in many {
                let bytes = png_bytes_of(result)?;
                writer
                    .start_file(export_file_name(&result.source_file_name), options)
                    .map_err(|e| CropError::Archive(format!("创建归档条目失败：{}", e)))?;
                writer
                    .write_all(&bytes)
                    .map_err(|e| CropError::Archive(format!("写入归档条目失败：{}", e)))?;
            }

            let cursor = writer
                .finish()
                .map_err(|e| CropError::Archive(format!("归档收尾失败：{}", e)))?;

            log::info!(
                "📦 批量归档完成 - 条目数: {} 体积: {} 字节",
                many.len(),
                cursor.get_ref().len()
            );

            Ok(Some(ExportPayload {
                file_name: ARCHIVE_FILE_NAME.to_string(),
                media_type: "application/zip",
                data_base64: general_purpose::STANDARD.encode(cursor.into_inner()),
            }))
        }
    }
}
