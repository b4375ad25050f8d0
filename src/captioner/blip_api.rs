//! BLIP推論API連携
//!
//! `POST {api_base}/{model}` に画像バイト列をそのまま送り、
//! `[{"generated_text": "..."}]` 形式のレスポンスからキャプションを取り出す。

use super::{CaptionFuture, CaptionProvider, clean_caption};
use crate::config::Config;
use crate::error::{CivicAiError, Result};
use crate::image_input::CaptionImage;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CaptionResponse {
    Many(Vec<GeneratedText>),
    One(GeneratedText),
}

pub struct BlipApiCaptioner {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl BlipApiCaptioner {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CivicAiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", config.api_base.trim_end_matches('/'), config.model),
            api_key: config.get_api_key(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request_caption(&self, image: &CaptionImage) -> Result<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, CaptionImage::MIME_TYPE)
            .body(image.png.clone());

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CivicAiError::ApiCall(format!("{}: {}", self.endpoint, e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(CivicAiError::ApiCall(format!("{} - {}", status, body)));
        }

        debug!(endpoint = %self.endpoint, body = %body, "BLIP API response");
        parse_caption_response(&body)
    }
}

impl CaptionProvider for BlipApiCaptioner {
    fn name(&self) -> &str {
        "blip"
    }

    fn caption<'a>(&'a self, image: &'a CaptionImage) -> CaptionFuture<'a> {
        Box::pin(self.request_caption(image))
    }
}

/// 推論APIのレスポンスからキャプションを取り出す
pub fn parse_caption_response(body: &str) -> Result<String> {
    let response: CaptionResponse = serde_json::from_str(body)
        .map_err(|e| CivicAiError::ApiParse(format!("{}: {}", e, body)))?;

    let generated = match response {
        CaptionResponse::Many(items) => items
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .unwrap_or_default(),
        CaptionResponse::One(item) => item.generated_text,
    };

    clean_caption(&generated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_response() {
        let body = r#"[{"generated_text": "a large pothole in the road"}]"#;
        assert_eq!(parse_caption_response(body).unwrap(), "a large pothole in the road");
    }

    #[test]
    fn test_parse_single_object_response() {
        let body = r#"{"generated_text": "  a fallen tree  "}"#;
        assert_eq!(parse_caption_response(body).unwrap(), "a fallen tree");
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(matches!(parse_caption_response("[]"), Err(CivicAiError::ApiParse(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_caption_response(r#"{"error": "Model is loading"}"#);
        assert!(matches!(result, Err(CivicAiError::ApiParse(_))));
    }

    #[test]
    fn test_endpoint_joins_model() {
        let config = Config {
            api_base: "http://localhost:9000/models/".into(),
            ..Default::default()
        };
        let captioner = BlipApiCaptioner::new(&config).unwrap();
        assert_eq!(
            captioner.endpoint(),
            "http://localhost:9000/models/Salesforce/blip-image-captioning-base"
        );
    }
}
