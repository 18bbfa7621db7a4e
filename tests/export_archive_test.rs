//! 导出链路端到端测试：
//! 先经服务提交真实图片，再校验单文件载荷与 zip 归档的条目命名与内容。

use std::io::{Cursor, Read as _};

use base64::{Engine as _, engine::general_purpose};
use image::GenericImageView as _;
use square_cropper::cropper::{CropServiceState, ExportPayload, SourceFilePayload};

fn solid_png(width: u32, height: u32, shade: u8) -> SourceFilePayload {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([shade, shade, shade, 255]));

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("test png should encode");

    SourceFilePayload {
        name: format!("shade-{}.png", shade),
        media_type: "image/png".to_string(),
        data: general_purpose::STANDARD.encode(bytes),
    }
}

fn decode(payload: &ExportPayload) -> Vec<u8> {
    general_purpose::STANDARD
        .decode(&payload.data_base64)
        .expect("payload base64 should decode")
}

#[tokio::test]
async fn export_all_on_empty_session_triggers_nothing() {
    let service = CropServiceState::new();

    let payload = service.export_all().expect("export should succeed");
    assert!(payload.is_none());
}

#[tokio::test]
async fn export_all_singleton_equals_export_single() {
    let service = CropServiceState::new();
    service
        .submit_batch(vec![solid_png(10, 6, 40)])
        .await
        .expect("batch should succeed");

    let single = service.export_single(0).expect("single export should succeed");
    let bulk = service
        .export_all()
        .expect("bulk export should succeed")
        .expect("singleton export should produce a payload");

    assert_eq!(single.file_name, "cropped-shade-40.png");
    assert_eq!(bulk.file_name, single.file_name);
    assert_eq!(bulk.data_base64, single.data_base64);

    // 载荷内容是合法 PNG 且已裁为方形
    let img = image::load_from_memory(&decode(&single)).expect("payload should be a png");
    assert_eq!(img.width(), 6);
    assert_eq!(img.height(), 6);
}

#[tokio::test]
async fn export_all_many_bundles_one_named_entry_per_result() {
    let service = CropServiceState::new();
    service
        .submit_batch(vec![solid_png(10, 6, 10), solid_png(6, 10, 20)])
        .await
        .expect("batch should succeed");

    let payload = service
        .export_all()
        .expect("bulk export should succeed")
        .expect("two results should produce an archive");

    assert_eq!(payload.file_name, "cropped-images.zip");

    let mut archive =
        zip::ZipArchive::new(Cursor::new(decode(&payload))).expect("payload should be a zip");
    assert_eq!(archive.len(), 2);

    for entry_name in ["cropped-shade-10.png", "cropped-shade-20.png"] {
        let mut bytes = Vec::new();
        archive
            .by_name(entry_name)
            .unwrap_or_else(|_| panic!("entry {} should exist", entry_name))
            .read_to_end(&mut bytes)
            .expect("entry should read");

        let img = image::load_from_memory(&bytes).expect("entry should be a png");
        assert_eq!(img.width(), 6);
        assert_eq!(img.height(), 6);
    }
}

#[tokio::test]
async fn repeated_exports_build_fresh_payloads() {
    let service = CropServiceState::new();
    service
        .submit_batch(vec![solid_png(8, 8, 1), solid_png(8, 8, 2)])
        .await
        .expect("batch should succeed");

    // 归档缓冲按次构建，重复调用互不影响
    let first = service
        .export_all()
        .expect("first export should succeed")
        .expect("archive should be produced");
    let second = service
        .export_all()
        .expect("second export should succeed")
        .expect("archive should be produced");

    assert_eq!(first.file_name, second.file_name);
    assert_eq!(decode(&first).len(), decode(&second).len());
}

#[tokio::test]
async fn removing_an_entry_shrinks_the_archive() {
    let service = CropServiceState::new();
    service
        .submit_batch(vec![solid_png(8, 8, 1), solid_png(8, 8, 2), solid_png(8, 8, 3)])
        .await
        .expect("batch should succeed");

    service.remove_at(1).expect("remove should succeed");

    let payload = service
        .export_all()
        .expect("export should succeed")
        .expect("archive should be produced");

    let mut archive =
        zip::ZipArchive::new(Cursor::new(decode(&payload))).expect("payload should be a zip");
    assert_eq!(archive.len(), 2);
    assert!(archive.by_name("cropped-shade-1.png").is_ok());
    assert!(archive.by_name("cropped-shade-3.png").is_ok());
}
