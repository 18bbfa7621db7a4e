//! # 方形裁剪模块（cropper）
//!
//! ## 设计思路
//!
//! 该模块将“批量接收 → 加载校验 → 解码裁剪 → 结果管理 → 导出打包”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：仅做 IPC 入参/出参适配（薄封装）
//! - `service`：承载可注入状态（`CropServiceState`），批量编排与原子提交
//! - `session`：结果列表/错误标志/处理中标志的显式状态容器
//! - `handler`：编排单文件处理流水线
//! - `loader`：负责 Base64 / Data URL 载荷解析与体积校验
//! - `pipeline`：负责解码、像素限制、方形裁剪、PNG 编码
//! - `exporter`：负责单文件下载载荷与 zip 批量打包
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 实现思路
//!
//! 对外仅暴露必要类型与命令函数，内部细节保持 `mod` 私有。
//! 在 Tauri 侧通过 `CropServiceState` 注入状态，提升测试隔离与后续扩展能力。
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 前端 invoke
//!    ↓
//! commands.rs（参数适配）
//!    ↓
//! service.rs（State 注入、批量并发 + 全有或全无提交）
//!    ↓
//! handler.rs（单文件编排 + 阶段耗时日志）
//!    ├─ loader.rs（Base64 解析 + 体积校验）
//!    └─ pipeline.rs（解码 + 像素限制 + 方形裁剪 + PNG 编码）
//!    ↓
//! session.rs（append / remove_at / set_error 等显式状态迁移）
//!    ↓
//! exporter.rs（cropped-<原文件名> 单文件 / cropped-images.zip 打包）
//! ```
//!
//! ## 关键约定
//!
//! - 裁剪窗口：边长 `min(w, h)`，水平居中，垂直锚定顶部（竖图主体通常偏上）。
//! - 批量提交是原子的：任一文件失败则整批丢弃，仅设置一条通用错误信息。
//! - 导出设置（quality / max_size / format / maintain_metadata）由前端设置
//!   面板收集并在后端存取，裁剪流水线当前并不消费这些字段。

pub mod commands;
mod config;
mod error;
mod exporter;
mod handler;
mod loader;
mod pipeline;
mod service;
mod session;
mod source;

pub use commands::{
    clear_crop_session,
    export_all_images,
    export_single_image,
    get_crop_session,
    get_export_settings,
    remove_cropped_image,
    set_export_settings,
    submit_image_batch,
};
pub use config::{CropConfig, ExportSettings};
pub use error::CropError;
pub use exporter::ExportPayload;
pub use loader::SourceFilePayload;
pub use service::CropServiceState;
pub use session::SessionSnapshot;
pub use source::{CroppedResult, SourceFile};

/// 内部核心编排器，不直接暴露给 Tauri 命令层。
pub(crate) use handler::CropHandler;
