use crate::config::types::{Config, ThumbnailSettings, VideoExtensionTable};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 編譯時嵌入的影片副檔名表（不需要外部檔案）
const VIDEO_EXTENSIONS_JSON: &str = include_str!("../data/video_extensions.json");

pub const DEFAULT_SETTINGS_FILE: &str = "thumbnail_settings.json";

impl Config {
    /// 載入設定；設定檔不存在時使用預設值，格式錯誤則回傳錯誤
    pub fn load(settings_path: &Path) -> Result<Self> {
        let video_extensions = Self::load_embedded_video_extensions()?;
        let settings = Self::load_settings(settings_path)?;

        Ok(Self {
            settings,
            video_extensions,
        })
    }

    fn load_settings(path: &Path) -> Result<ThumbnailSettings> {
        if !path.exists() {
            return Ok(ThumbnailSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    fn load_embedded_video_extensions() -> Result<VideoExtensionTable> {
        serde_json::from_str(VIDEO_EXTENSIONS_JSON).context("無法解析嵌入的影片副檔名設定")
    }
}
