use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// キャプション生成に使うAIプロバイダ
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// 事前学習済みBLIPモデル（HTTP推論API）
    #[default]
    Blip,
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    /// ローカルCLIのコマンド名（HTTP経由のプロバイダは `None`）
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::Blip => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
            AiProvider::Gemini => Some("gemini"),
        }
    }

    /// CLIへ渡す引数
    pub fn command_args(&self, prompt: &str) -> Vec<String> {
        match self {
            AiProvider::Blip => Vec::new(),
            AiProvider::Claude => vec![
                "-p".into(),
                prompt.into(),
                "--output-format".into(),
                "text".into(),
            ],
            AiProvider::Codex => vec!["exec".into(), prompt.into()],
            AiProvider::Gemini => vec!["-p".into(), prompt.into()],
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::Blip => write!(f, "blip"),
            AiProvider::Claude => write!(f, "claude"),
            AiProvider::Codex => write!(f, "codex"),
            AiProvider::Gemini => write!(f, "gemini"),
        }
    }
}
