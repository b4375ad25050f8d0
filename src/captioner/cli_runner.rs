//! AI CLI連携モジュール
//!
//! 画像を一時PNGとして書き出し、ローカルのAI CLI（claude/codex/gemini）に
//! 1文のキャプションを生成させる。標準出力をそのままキャプションとして扱う。

use super::{CaptionFuture, CaptionProvider, clean_caption};
use crate::ai_provider::AiProvider;
use crate::error::{CivicAiError, Result};
use crate::image_input::CaptionImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct CliCaptioner {
    provider: AiProvider,
    program: String,
    timeout: Duration,
}

impl CliCaptioner {
    pub fn new(provider: AiProvider, timeout: Duration) -> Result<Self> {
        let program = provider.command_name().ok_or_else(|| {
            CivicAiError::Config(format!("{} is not a CLI provider", provider))
        })?;

        Ok(Self {
            provider,
            program: program.to_string(),
            timeout,
        })
    }

    /// 実行ファイルを差し替える（ラッパースクリプト等）
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn run(&self, image: &CaptionImage) -> Result<String> {
        let temp_path = write_temp_image(image).await?;
        let result = self.run_cli(&temp_path).await;
        tokio::fs::remove_file(&temp_path).await.ok();
        result
    }

    async fn run_cli(&self, image_path: &Path) -> Result<String> {
        let prompt = build_caption_prompt(image_path);
        let args = self.provider.command_args(&prompt);

        debug!(program = %self.program, prompt_len = prompt.len(), "AI CLI呼び出し");

        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("cmd");
            c.arg("/c").arg(&self.program).args(&args);
            c
        };

        #[cfg(not(windows))]
        let mut command = {
            let mut c = Command::new(&self.program);
            c.args(&args);
            c
        };

        command.kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                CivicAiError::CliExecution(format!(
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| CivicAiError::CliExecution(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CivicAiError::CliExecution(format!(
                "{} failed (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        let preview: String = response.chars().take(200).collect();
        debug!(response = %preview, "AI CLIレスポンス");

        clean_caption(&response)
    }
}

impl CaptionProvider for CliCaptioner {
    fn name(&self) -> &str {
        self.provider.command_name().unwrap_or("cli")
    }

    fn caption<'a>(&'a self, image: &'a CaptionImage) -> CaptionFuture<'a> {
        Box::pin(self.run(image))
    }
}

fn build_caption_prompt(image_path: &Path) -> String {
    format!(
        "Read the image file {} and describe what it shows in one short English sentence, \
         like an image caption. Output only the sentence.",
        image_path.display().to_string().replace('\\', "/")
    )
}

async fn write_temp_image(image: &CaptionImage) -> Result<PathBuf> {
    let temp_dir = std::env::temp_dir().join("civic-ai-images");
    tokio::fs::create_dir_all(&temp_dir).await?;

    let file_name = format!(
        "upload-{}-{}.png",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let path = temp_dir.join(file_name);
    tokio::fs::write(&path, &image.png).await?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_image() -> CaptionImage {
        CaptionImage {
            png: vec![0x89, b'P', b'N', b'G'],
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_blip_is_not_cli_provider() {
        let result = CliCaptioner::new(AiProvider::Blip, Duration::from_secs(1));
        assert!(matches!(result, Err(CivicAiError::Config(_))));
    }

    #[test]
    fn test_build_caption_prompt() {
        let prompt = build_caption_prompt(Path::new("/tmp/civic-ai-images/upload-1-0.png"));
        assert!(prompt.contains("/tmp/civic-ai-images/upload-1-0.png"));
        assert!(prompt.contains("one short English sentence"));
    }

    #[tokio::test]
    async fn test_write_temp_image_unique() {
        let image = dummy_image();
        let a = write_temp_image(&image).await.unwrap();
        let b = write_temp_image(&image).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(std::fs::read(&a).unwrap(), image.png);
        std::fs::remove_file(a).ok();
        std::fs::remove_file(b).ok();
    }

    #[tokio::test]
    async fn test_missing_program() {
        let captioner = CliCaptioner::new(AiProvider::Claude, Duration::from_secs(5))
            .unwrap()
            .with_program("civic-ai-nonexistent-cli-12345");
        let result = captioner.caption(&dummy_image()).await;
        assert!(matches!(result, Err(CivicAiError::CliExecution(_))));
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-ai.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cli_stdout_is_caption() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "echo 'a pothole filled with water'");
        let captioner = CliCaptioner::new(AiProvider::Gemini, Duration::from_secs(10))
            .unwrap()
            .with_program(script);

        let caption = captioner.caption(&dummy_image()).await.unwrap();
        assert_eq!(caption, "a pothole filled with water");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cli_failure_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "echo 'quota exceeded' >&2\nexit 3");
        let captioner = CliCaptioner::new(AiProvider::Codex, Duration::from_secs(10))
            .unwrap()
            .with_program(script);

        let err = captioner.caption(&dummy_image()).await.unwrap_err();
        assert!(matches!(&err, CivicAiError::CliExecution(msg) if msg.contains("quota exceeded")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cli_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "sleep 5");
        let captioner = CliCaptioner::new(AiProvider::Claude, Duration::from_millis(200))
            .unwrap()
            .with_program(script);

        let err = captioner.caption(&dummy_image()).await.unwrap_err();
        assert!(matches!(&err, CivicAiError::CliExecution(msg) if msg.contains("timed out")));
    }
}
