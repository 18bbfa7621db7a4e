// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 方形裁剪工具 — 应用入口
//!
//! 本文件仅负责应用初始化与插件/命令注册。
//! 业务逻辑集中在 `cropper` 模块中，详见 `lib.rs` 架构文档。

use square_cropper::cropper;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        // 插件初始化（保存对话框 + 文件写入由前端经插件完成）
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        // 应用设置
        .setup(|app| {
            use tauri::Manager;

            log::info!("setup: begin");

            app.manage(cropper::CropServiceState::new());
            log::info!("setup: crop service managed");

            log::info!("setup: complete");
            Ok(())
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 批量上传与会话管理
            cropper::commands::submit_image_batch,
            cropper::commands::get_crop_session,
            cropper::commands::remove_cropped_image,
            cropper::commands::clear_crop_session,
            // 导出
            cropper::commands::export_single_image,
            cropper::commands::export_all_images,
            // 导出设置
            cropper::commands::set_export_settings,
            cropper::commands::get_export_settings,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
