//! # Tauri 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 所有实际处理交由 `CropServiceState`，保持命令函数薄、稳定、易测试。

use tauri::State;

use super::exporter::ExportPayload;
use super::loader::SourceFilePayload;
use super::session::SessionSnapshot;
use super::source::CroppedResult;
use super::{service, CropError, ExportSettings};

/// 结构化命令错误（IPC 出参）。
#[derive(Debug, Clone, serde::Serialize)]
pub struct CropCommandError {
    pub code: &'static str,
    pub stage: &'static str,
    pub message: String,
}

impl From<CropError> for CropCommandError {
    fn from(error: CropError) -> Self {
        Self {
            code: error.code(),
            stage: error.stage(),
            message: error.to_string(),
        }
    }
}

/// 提交一批上传文件：并发裁剪，全有或全无提交。
#[tauri::command]
pub async fn submit_image_batch(
    state: State<'_, service::CropServiceState>,
    files: Vec<SourceFilePayload>,
) -> Result<Vec<CroppedResult>, CropCommandError> {
    let batch = state.submit_batch(files).await.map_err(CropCommandError::from)?;
    Ok(batch)
}

/// 读取会话快照（结果列表、错误信息、处理中标志）。
#[tauri::command]
pub fn get_crop_session(
    state: State<'_, service::CropServiceState>,
) -> Result<SessionSnapshot, CropCommandError> {
    state.session_snapshot().map_err(CropCommandError::from)
}

/// 按位置删除单个结果。
#[tauri::command]
pub fn remove_cropped_image(
    state: State<'_, service::CropServiceState>,
    index: usize,
) -> Result<(), CropCommandError> {
    state.remove_at(index).map_err(CropCommandError::from)?;
    Ok(())
}

/// 清空会话（结果、错误与处理标志）。
#[tauri::command]
pub fn clear_crop_session(
    state: State<'_, service::CropServiceState>,
) -> Result<(), CropCommandError> {
    state.clear_session().map_err(CropCommandError::from)
}

/// 构造指定位置结果的单文件下载载荷。
#[tauri::command]
pub fn export_single_image(
    state: State<'_, service::CropServiceState>,
    index: usize,
) -> Result<ExportPayload, CropCommandError> {
    state.export_single(index).map_err(CropCommandError::from)
}

/// 构造全部结果的批量下载载荷。
///
/// 结果列表为空时返回 `None`，前端据此跳过下载动作。
#[tauri::command]
pub fn export_all_images(
    state: State<'_, service::CropServiceState>,
) -> Result<Option<ExportPayload>, CropCommandError> {
    state.export_all().map_err(CropCommandError::from)
}

/// 更新导出设置。
#[tauri::command]
pub fn set_export_settings(
    state: State<'_, service::CropServiceState>,
    settings: ExportSettings,
) -> Result<(), crate::error::AppError> {
    state.set_export_settings(settings)?;
    Ok(())
}

/// 读取当前导出设置。
#[tauri::command]
pub fn get_export_settings(
    state: State<'_, service::CropServiceState>,
) -> Result<ExportSettings, crate::error::AppError> {
    Ok(state.get_export_settings()?)
}
