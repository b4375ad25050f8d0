use crate::error::CivicAiError;
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use civic_ai_common::ErrorResponse;
use tracing::{error, warn};

/// エラーを `{"error": "..."}` 形式で返す
impl IntoResponse for CivicAiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = %status, error = %message, "リクエスト処理に失敗");
        } else {
            warn!(status = %status, error = %message, "リクエストを拒否");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
