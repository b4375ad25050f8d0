//! 画像入力モジュール
//!
//! アップロード/ファイルの画像をデコードし、RGBに変換してキャプション生成用のPNGへ再エンコードする。

use crate::error::{CivicAiError, Result};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// キャプション生成に渡すRGB画像
#[derive(Debug, Clone)]
pub struct CaptionImage {
    /// PNGエンコード済みのバイト列
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CaptionImage {
    pub const MIME_TYPE: &'static str = "image/png";
}

/// バイト列をデコードしてRGB化・縮小する
///
/// `max_image_size` は長辺の上限（0なら縮小しない）。拡大はしない。
pub fn decode_image(bytes: &[u8], max_image_size: u32) -> Result<CaptionImage> {
    if bytes.is_empty() {
        return Err(CivicAiError::ImageLoad("image data is empty".into()));
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CivicAiError::ImageLoad(e.to_string()))?;

    let mut rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    if max_image_size > 0 && rgb.width().max(rgb.height()) > max_image_size {
        rgb = DynamicImage::ImageRgb8(rgb.thumbnail(max_image_size, max_image_size).to_rgb8());
    }

    let mut png = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CivicAiError::ImageLoad(format!("PNG encoding failed: {}", e)))?;

    Ok(CaptionImage {
        png,
        width: rgb.width(),
        height: rgb.height(),
    })
}
