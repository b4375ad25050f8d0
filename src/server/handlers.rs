use super::AppState;
use crate::error::{CivicAiError, Result};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};
use civic_ai_common::ClassificationResult;
use tracing::{debug, info};

/// アップロードのフィールド名
pub const IMAGE_FIELD: &str = "image";

/// POST /classify
///
/// multipartでない/`image` ファイルパートがないリクエストは「画像なし」として扱う。
pub async fn classify_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassificationResult>> {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "multipart以外のリクエスト");
            return Err(CivicAiError::NoImageUploaded);
        }
    };

    let bytes = read_image_field(&mut multipart)
        .await?
        .ok_or(CivicAiError::NoImageUploaded)?;

    info!(
        bytes = bytes.len(),
        provider = state.pipeline.provider_name(),
        "画像を受信"
    );

    let outcome = state.pipeline.classify_bytes(bytes).await?;
    Ok(Json(outcome.into_result()?))
}

/// GET /health
pub async fn health_handler() -> &'static str {
    "OK"
}

/// 最初の `image` ファイルパートを読み込む（他のフィールドは読み捨て）
async fn read_image_field(multipart: &mut Multipart) -> Result<Option<Vec<u8>>> {
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                CivicAiError::UploadTooLarge
            } else {
                CivicAiError::InvalidUpload(e.body_text())
            }
        })?;

        let Some(field) = field else {
            return Ok(None);
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        // ファイル名のないテキストパートは画像とみなさない
        if field.file_name().is_none() {
            continue;
        }

        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                CivicAiError::UploadTooLarge
            } else {
                CivicAiError::InvalidUpload(e.body_text())
            }
        })?;

        return Ok(Some(data.to_vec()));
    }
}
