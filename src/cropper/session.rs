//! # 会话状态容器模块
//!
//! ## 设计思路
//!
//! 结果列表、错误标志与处理中标志是整个应用唯一的共享可变状态。
//! 用显式状态容器替代散落的全局变量，所有变更必须经过定义好的迁移方法，
//! 保证状态只在单一锁保护下按事件顺序演进。
//!
//! ## 实现思路
//!
//! - `append_batch`：整批追加到列表尾部，不触碰既有条目（原子提交的落点）。
//! - `remove_at`：按位置删除恰好一个条目，其余条目相对顺序不变。
//! - `set_error` / `clear_error`：单条通用错误信息的设置与清除。
//! - `begin_processing` / `end_processing`：批处理期间的 UI 状态标志。

use serde::Serialize;

use super::source::CroppedResult;
use super::CropError;

/// 会话状态快照（IPC 出参）。
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// 按上传顺序排列的裁剪结果。
    pub results: Vec<CroppedResult>,
    /// 当前错误信息（无错误时为 `None`）。
    pub error: Option<String>,
    /// 是否有批次正在处理中。
    pub processing: bool,
}

/// 裁剪会话状态。
///
/// 仅在 `CropServiceState` 的互斥锁内被访问，且从不跨 await 点持锁。
#[derive(Debug, Default)]
pub(crate) struct CropSession {
    results: Vec<CroppedResult>,
    error: Option<String>,
    processing: bool,
}

impl CropSession {
    /// 整批追加结果，既有条目保持原位。
    pub(crate) fn append_batch(&mut self, batch: Vec<CroppedResult>) {
        self.results.extend(batch);
    }

    /// 按位置删除恰好一个条目，后续条目整体前移一位。
    pub(crate) fn remove_at(&mut self, index: usize) -> Result<CroppedResult, CropError> {
        if index >= self.results.len() {
            return Err(CropError::InvalidInput(format!(
                "删除位置越界：{}（当前共 {} 个结果）",
                index,
                self.results.len()
            )));
        }

        Ok(self.results.remove(index))
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn begin_processing(&mut self) {
        self.processing = true;
    }

    pub(crate) fn end_processing(&mut self) {
        self.processing = false;
    }

    /// 清空整个会话（结果、错误与处理标志）。
    pub(crate) fn clear(&mut self) {
        self.results.clear();
        self.error = None;
        self.processing = false;
    }

    pub(crate) fn results(&self) -> &[CroppedResult] {
        &self.results
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            results: self.results.clone(),
            error: self.error.clone(),
            processing: self.processing,
        }
    }
}
