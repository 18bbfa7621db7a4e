//! # 方形裁剪工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  前端 (静态 HTML + JS)                    │
//! │                                                          │
//! │  拖拽/选择文件 ── 预览网格 ── 下载按钮 ── 设置面板        │
//! │       │  (base64 上传 + 保存对话框下载)                   │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (Result<T, CropCommandError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                 │
//! │  │                                                       │
//! │  └─ cropper ──── 图片方形裁剪与批量导出                  │
//! │      ├─ session   结果列表/错误/处理中 状态容器          │
//! │      ├─ handler   单文件编排（校验→加载→解码→裁剪→编码） │
//! │      ├─ loader    Base64 / Data URL 载荷解析             │
//! │      ├─ pipeline  解码·像素限制·方形裁剪·PNG 编码        │
//! │      └─ exporter  单文件下载与 zip 批量打包              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有 Tauri command 的返回类型 |
//! | [`cropper`] | 批量上传、方形裁剪、结果列表管理、单文件/zip 导出 |

pub mod error;
pub mod cropper;
