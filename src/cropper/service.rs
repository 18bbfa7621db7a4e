//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `CropServiceState` 作为 Tauri 注入状态，替代全局单例函数。
//! 好处：
//! 1. 生命周期清晰（由 `main.rs` 统一管理）
//! 2. 测试可创建独立实例，减少共享状态副作用
//! 3. 会话状态只经由本层的迁移方法变化，批量提交保持原子性
//!
//! ## 实现思路
//!
//! 对外仅暴露少量稳定 API：
//! - `submit_batch`：并发处理整批文件，全有或全无提交
//! - `remove_at`：按位置删除单个结果
//! - `export_single` / `export_all`：构造下载载荷
//! - `session_snapshot` / `clear_session`：状态查询与整体重置
//! - `set_export_settings` / `get_export_settings`：设置面板存取
//!
//! 会话锁只做短临界区操作，绝不跨 await 点持有。

use std::sync::{Arc, Mutex, RwLock};

use super::exporter::{self, ExportPayload};
use super::loader::SourceFilePayload;
use super::session::{CropSession, SessionSnapshot};
use super::source::CroppedResult;
use super::{CropConfig, CropError, CropHandler, ExportSettings};

/// 批量失败时面向用户的唯一通用提示。
///
/// 按既有产品行为，不区分错误种类，也不指认具体失败文件。
pub(crate) const BATCH_ERROR_MESSAGE: &str =
    "Error processing one or more images. Please ensure all files are valid images.";

/// 裁剪服务状态。
///
/// 作为 Tauri `State` 注入到命令层，内部持有 `CropHandler` 与会话容器。
pub struct CropServiceState {
    handler: Arc<CropHandler>,
    session: Mutex<CropSession>,
    export_settings: RwLock<ExportSettings>,
}

impl Default for CropServiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl CropServiceState {
    /// 使用默认配置创建服务状态。
    ///
    /// # 示例
    /// ```rust
    /// use square_cropper::cropper::CropServiceState;
    ///
    /// let service = CropServiceState::new();
    /// assert!(service.session_snapshot().unwrap().results.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(CropConfig::default())
    }

    /// 使用自定义配置创建服务状态。
    ///
    /// 主要用于测试或后续按场景注入不同策略。
    pub fn with_config(config: CropConfig) -> Self {
        Self {
            handler: Arc::new(CropHandler::new(config)),
            session: Mutex::new(CropSession::default()),
            export_settings: RwLock::new(ExportSettings::default()),
        }
    }

    fn lock_session(&self) -> Result<std::sync::MutexGuard<'_, CropSession>, CropError> {
        self.session
            .lock()
            .map_err(|_| CropError::Internal("会话状态锁已中毒".to_string()))
    }

    /// 并发处理整批上传文件，并将结果原子提交到会话。
    ///
    /// 语义（与既有产品行为一致）：
    /// - 批内所有文件同时处理，完成顺序不保证；
    /// - 提交顺序 = 上传顺序（按提交序拼接，与完成序无关）；
    /// - 任一文件失败则整批丢弃，仅设置一条通用错误信息；
    /// - 已提交批次不受影响，不支持取消与超时。
    pub async fn submit_batch(
        &self,
        payloads: Vec<SourceFilePayload>,
    ) -> Result<Vec<CroppedResult>, CropError> {
        {
            let mut session = self.lock_session()?;
            session.clear_error();
            session.begin_processing();
        }

        let outcome = self.process_batch(payloads).await;

        let mut session = self.lock_session()?;
        session.end_processing();

        match outcome {
            Ok(batch) => {
                session.append_batch(batch.clone());
                log::info!("✅ 批次提交成功 - 新增结果: {}", batch.len());
                Ok(batch)
            }
            Err(err) => {
                session.set_error(BATCH_ERROR_MESSAGE.to_string());
                log::warn!(
                    "🚫 批次整体回滚 - stage: {} code: {} 原因: {}",
                    err.stage(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// 批内并发执行，全部完成后按提交顺序汇总。
    async fn process_batch(
        &self,
        payloads: Vec<SourceFilePayload>,
    ) -> Result<Vec<CroppedResult>, CropError> {
        let config = self.handler.config_snapshot()?;

        let handles: Vec<_> = payloads
            .into_iter()
            .map(|payload| {
                let handler = Arc::clone(&self.handler);
                let config = config.clone();
                tokio::task::spawn_blocking(move || handler.process_payload(payload, &config))
            })
            .collect();

        // 不做快速失败：与 Promise.all 一致，等全部任务自然结束后再裁决
        let mut batch = Vec::with_capacity(handles.len());
        let mut first_error = None;

        for handle in handles {
            let joined = handle
                .await
                .map_err(|e| CropError::Internal(format!("批处理任务异常结束：{}", e)));

            match joined.and_then(|result| result) {
                Ok(result) => batch.push(result),
                Err(err) if first_error.is_none() => first_error = Some(err),
                Err(_) => {}
            }
        }

        match first_error {
            None => Ok(batch),
            Some(err) => Err(err),
        }
    }

    /// 按位置删除单个结果。
    pub fn remove_at(&self, index: usize) -> Result<CroppedResult, CropError> {
        let mut session = self.lock_session()?;
        let removed = session.remove_at(index)?;
        log::info!("🗑️ 已删除结果 - 位置: {} 文件: {}", index, removed.source_file_name);
        Ok(removed)
    }

    /// 读取会话状态快照（结果列表 + 错误 + 处理标志）。
    pub fn session_snapshot(&self) -> Result<SessionSnapshot, CropError> {
        Ok(self.lock_session()?.snapshot())
    }

    /// 清空整个会话。
    pub fn clear_session(&self) -> Result<(), CropError> {
        self.lock_session()?.clear();
        Ok(())
    }

    /// 构造指定位置结果的单文件下载载荷。
    pub fn export_single(&self, index: usize) -> Result<ExportPayload, CropError> {
        let session = self.lock_session()?;
        let result = session.results().get(index).ok_or_else(|| {
            CropError::InvalidInput(format!(
                "导出位置越界：{}（当前共 {} 个结果）",
                index,
                session.results().len()
            ))
        })?;

        exporter::export_single(result)
    }

    /// 构造全部结果的批量下载载荷。
    ///
    /// 空列表返回 `None`，单元素与单文件导出一致，多元素打 zip。
    pub fn export_all(&self) -> Result<Option<ExportPayload>, CropError> {
        let session = self.lock_session()?;
        exporter::export_all(session.results())
    }

    /// 更新导出设置（带范围校验）。
    pub fn set_export_settings(&self, settings: ExportSettings) -> Result<(), CropError> {
        settings.validate()?;

        let mut guard = self
            .export_settings
            .write()
            .map_err(|_| CropError::Internal("导出设置写入锁已中毒".to_string()))?;
        *guard = settings;
        Ok(())
    }

    /// 读取当前导出设置。
    pub fn get_export_settings(&self) -> Result<ExportSettings, CropError> {
        self.export_settings
            .read()
            .map(|settings| settings.clone())
            .map_err(|_| CropError::Internal("导出设置读取锁已中毒".to_string()))
    }
}
