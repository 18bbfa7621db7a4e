//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `CropHandler` 只负责单文件流程编排与配置管理，不直接与 Tauri 绑定。
//! 处理链路固定为：
//! 1. 读取配置快照
//! 2. 校验媒体类型并解析 Base64 载荷
//! 3. 解码、限制检查、方形裁剪、PNG 编码
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<CropConfig>>` 支持运行时调整。
//! - 单个批次内使用“同一配置快照”，避免处理中途配置漂移。
//! - 记录 `load/crop/total` 阶段耗时，便于性能诊断。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::loader::SourceFilePayload;
use super::source::CroppedResult;
use super::{CropConfig, CropError};

/// 裁剪处理器。
///
/// 封装配置状态，并编排 `loader` 与 `pipeline` 实现单文件完整流程。
pub struct CropHandler {
    pub(super) config: Arc<RwLock<CropConfig>>,
}

impl CropHandler {
    /// 根据初始配置创建处理器。
    pub fn new(config: CropConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单个批次链路使用一致参数。
    pub(super) fn config_snapshot(&self) -> Result<CropConfig, CropError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| CropError::Internal("配置读取锁已中毒".to_string()))
    }

    /// 处理单个上传载荷：解析 → 解码 → 裁剪 → 编码。
    ///
    /// 每个文件独立失败，是否整批回滚由服务层决定。
    pub(super) fn process_payload(
        &self,
        payload: SourceFilePayload,
        config: &CropConfig,
    ) -> Result<CroppedResult, CropError> {
        let total_start = Instant::now();
        let file_name = payload.name.clone();

        let load_start = Instant::now();
        let source = Self::load_source_file(payload, config)?;
        let load_elapsed = load_start.elapsed();

        let crop_start = Instant::now();
        let result = self.decode_and_crop(source, config)?;
        let crop_elapsed = crop_start.elapsed();

        log::info!(
            "⏱️ 单文件处理完成 - 文件: {} load: {:?} crop: {:?} total: {:?}",
            file_name,
            load_elapsed,
            crop_elapsed,
            total_start.elapsed()
        );

        Ok(result)
    }
}
