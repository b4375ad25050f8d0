use civic_ai_common::types::{NOT_CIVIC_ISSUE_MESSAGE, NO_IMAGE_MESSAGE};
use axum::http::StatusCode;
use thiserror::Error;

/// HTTPクライアントにもそのまま返るため、メッセージは英語で統一する
#[derive(Error, Debug)]
pub enum CivicAiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Caption API call failed: {0}")]
    ApiCall(String),

    #[error("Failed to parse caption API response: {0}")]
    ApiParse(String),

    #[error("AI CLI execution failed: {0}")]
    CliExecution(String),

    #[error("{}", NO_IMAGE_MESSAGE)]
    NoImageUploaded,

    #[error("{}", NOT_CIVIC_ISSUE_MESSAGE)]
    NotCivicIssue,

    #[error("Invalid multipart upload: {0}")]
    InvalidUpload(String),

    #[error("Upload exceeds the size limit")]
    UploadTooLarge,

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CivicAiError>;

impl CivicAiError {
    /// HTTPレスポンスのステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            CivicAiError::NoImageUploaded
            | CivicAiError::NotCivicIssue
            | CivicAiError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            CivicAiError::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
