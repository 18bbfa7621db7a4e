//! 裁剪流水线端到端测试：
//! 通过公开的服务 API 走完整链路（载荷解析 → 解码 → 裁剪 → PNG 编码），
//! 并按像素校验裁剪窗口的精确位置。

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::GenericImageView;
use proptest::prelude::*;
use square_cropper::cropper::{CropError, CropServiceState, CroppedResult, SourceFilePayload};

/// 生成坐标编码图：像素 (x, y) 的 RGB = (x%256, x/256, y%256)。
/// 裁剪后任何位置的像素都能反推出它在源图中的坐标。
fn coordinate_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (x / 256) as u8, (y % 256) as u8, 255])
    });

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("test png should encode");
    bytes
}

fn payload(name: &str, png: Vec<u8>) -> SourceFilePayload {
    SourceFilePayload {
        name: name.to_string(),
        media_type: "image/png".to_string(),
        data: format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png)
        ),
    }
}

fn decode_result(result: &CroppedResult) -> image::DynamicImage {
    let base64_data = result
        .data_url
        .split_once(";base64,")
        .map(|(_, data)| data)
        .expect("result should be a data url");
    let bytes = general_purpose::STANDARD
        .decode(base64_data)
        .expect("result base64 should decode");
    image::load_from_memory(&bytes).expect("result png should decode")
}

/// 读取坐标编码图的某个像素，还原它在源图中的坐标。
fn source_coordinates(img: &image::DynamicImage, x: u32, y: u32) -> (u32, u32) {
    let pixel = img.get_pixel(x, y);
    let source_x = pixel[0] as u32 + (pixel[1] as u32) * 256;
    let source_y = pixel[2] as u32;
    (source_x, source_y)
}

#[tokio::test]
async fn landscape_800x600_crops_to_600_at_offset_100_0() {
    let service = CropServiceState::new();

    let batch = service
        .submit_batch(vec![payload("wide.png", coordinate_png(800, 600))])
        .await
        .expect("batch should succeed");

    let result = &batch[0];
    assert_eq!((result.width, result.height), (600, 600));

    let cropped = decode_result(result);
    assert_eq!(cropped.dimensions(), (600, 600));

    // 左上角像素来自源图 (100, 0)，右下角来自 (699, 599)
    assert_eq!(source_coordinates(&cropped, 0, 0), (100, 0));
    assert_eq!(source_coordinates(&cropped, 599, 599), (699, 599));
}

#[tokio::test]
async fn portrait_crop_is_anchored_to_the_top() {
    let service = CropServiceState::new();

    let batch = service
        .submit_batch(vec![payload("tall.png", coordinate_png(600, 800))])
        .await
        .expect("batch should succeed");

    let result = &batch[0];
    assert_eq!((result.width, result.height), (600, 600));

    let cropped = decode_result(result);
    // 垂直方向从顶部开始，不做居中
    assert_eq!(source_coordinates(&cropped, 0, 0), (0, 0));
    assert_eq!(source_coordinates(&cropped, 599, 599), (599, 599));
}

#[tokio::test]
async fn odd_width_difference_floors_horizontal_offset() {
    let service = CropServiceState::new();

    let batch = service
        .submit_batch(vec![payload("odd.png", coordinate_png(801, 600))])
        .await
        .expect("batch should succeed");

    let cropped = decode_result(&batch[0]);
    // (801 - 600) / 2 = 100（下取整）
    assert_eq!(source_coordinates(&cropped, 0, 0), (100, 0));
}

#[tokio::test]
async fn square_input_passes_through_unchanged() {
    let service = CropServiceState::new();

    let batch = service
        .submit_batch(vec![payload("square.png", coordinate_png(64, 64))])
        .await
        .expect("batch should succeed");

    let result = &batch[0];
    assert_eq!((result.width, result.height), (64, 64));

    let cropped = decode_result(result);
    assert_eq!(source_coordinates(&cropped, 0, 0), (0, 0));
    assert_eq!(source_coordinates(&cropped, 63, 63), (63, 63));
}

#[tokio::test]
async fn unparsable_bytes_fail_with_decode_error() {
    let service = CropServiceState::new();

    // 媒体类型合法但字节不是图片：错误应来自解码阶段
    let result = service
        .submit_batch(vec![SourceFilePayload {
            name: "broken.png".to_string(),
            media_type: "image/png".to_string(),
            data: general_purpose::STANDARD.encode(b"definitely not a png"),
        }])
        .await;

    assert!(matches!(result, Err(CropError::Decode(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// 对任意尺寸：输出恒为 `min(w, h)` 边长的正方形。
    #[test]
    fn cropped_output_is_always_square(width in 1u32..48, height in 1u32..48) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime should build");

        let service = CropServiceState::new();
        let batch = rt
            .block_on(service.submit_batch(vec![payload("any.png", coordinate_png(width, height))]))
            .expect("batch should succeed");

        let expected = width.min(height);
        prop_assert_eq!(batch[0].width, expected);
        prop_assert_eq!(batch[0].height, expected);
    }
}
