use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

pub const DEFAULT_INTERVAL_SECONDS: i64 = 20;
pub const DEFAULT_SEGMENTS: i64 = 10;
pub const DEFAULT_FORMAT: &str = "png";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoExtensionTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl VideoExtensionTable {
    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.video_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

/// 使用者設定（settings 檔），未出現的欄位使用預設值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// 固定間隔模式下，兩張縮圖之間的秒數
    pub interval_seconds: i64,
    /// 啟用後以片段數量推算間隔
    pub use_segments: bool,
    pub segments: i64,
    /// 以幀數而非秒數推進游標
    pub frame_stepping: bool,
    /// 最多輸出幾張，0 表示不限制
    pub max_thumbnails: i64,
    pub format: String,
    pub width: i32,
    pub height: i32,
    pub enable_black_filter: bool,
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            use_segments: false,
            segments: DEFAULT_SEGMENTS,
            frame_stepping: false,
            max_thumbnails: 0,
            format: DEFAULT_FORMAT.to_string(),
            width: -1,
            height: -1,
            enable_black_filter: true,
            ffprobe_path: "ffprobe".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

/// 呼叫端（CLI）提供的覆寫值
#[derive(Debug, Clone, Default)]
pub struct PolicyOverrides {
    pub interval_seconds: Option<i64>,
    pub use_segments: Option<bool>,
    pub segments: Option<i64>,
    pub frame_stepping: Option<bool>,
    pub max_thumbnails: Option<i64>,
    pub format: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub enable_black_filter: Option<bool>,
}

impl ThumbnailSettings {
    /// 將覆寫值疊加到設定上，產生新的設定
    #[must_use]
    pub fn with_overrides(&self, overrides: PolicyOverrides) -> Self {
        let defaults = self.clone();
        Self {
            interval_seconds: overrides
                .interval_seconds
                .unwrap_or(defaults.interval_seconds),
            use_segments: overrides.use_segments.unwrap_or(defaults.use_segments),
            segments: overrides.segments.unwrap_or(defaults.segments),
            frame_stepping: overrides.frame_stepping.unwrap_or(defaults.frame_stepping),
            max_thumbnails: overrides.max_thumbnails.unwrap_or(defaults.max_thumbnails),
            format: overrides.format.unwrap_or(defaults.format),
            width: overrides.width.unwrap_or(defaults.width),
            height: overrides.height.unwrap_or(defaults.height),
            enable_black_filter: overrides
                .enable_black_filter
                .unwrap_or(defaults.enable_black_filter),
            ..defaults
        }
    }

    #[must_use]
    pub fn to_policy(&self) -> SamplingPolicy {
        let mode = if self.use_segments {
            IntervalMode::Segments {
                count: self.segments,
            }
        } else {
            IntervalMode::Fixed {
                seconds: self.interval_seconds,
            }
        };
        let stepping = if self.frame_stepping {
            Stepping::Frames
        } else {
            Stepping::Seconds
        };

        SamplingPolicy {
            mode,
            stepping,
            max_thumbnails: self.max_thumbnails,
            format: self.format.clone(),
            scale: ScaleExpr {
                width: self.width,
                height: self.height,
            },
            enable_black_filter: self.enable_black_filter,
        }
    }
}

/// 間隔來源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalMode {
    Fixed { seconds: i64 },
    Segments { count: i64 },
}

/// 游標推進方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stepping {
    /// 從第 1 秒開始，每次前進固定秒數，遇到黑畫面直接跳到區段結尾
    #[default]
    Seconds,
    /// 從第 0 幀開始，每次前進 `trunc(fps) * interval` 幀，黑畫面逐步略過
    Frames,
}

/// ffmpeg scale 濾鏡參數，`-1` 表示依比例自動計算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleExpr {
    pub width: i32,
    pub height: i32,
}

impl Default for ScaleExpr {
    fn default() -> Self {
        Self {
            width: -1,
            height: -1,
        }
    }
}

impl fmt::Display for ScaleExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// 單次執行的取樣設定，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingPolicy {
    pub mode: IntervalMode,
    pub stepping: Stepping,
    pub max_thumbnails: i64,
    pub format: String,
    pub scale: ScaleExpr,
    pub enable_black_filter: bool,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        ThumbnailSettings::default().to_policy()
    }
}

impl SamplingPolicy {
    /// 是否已達輸出上限；`max_thumbnails <= 0` 表示不限制
    #[must_use]
    pub fn limit_reached(&self, accepted: usize) -> bool {
        usize::try_from(self.max_thumbnails)
            .ok()
            .filter(|&max| max > 0)
            .is_some_and(|max| accepted >= max)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: ThumbnailSettings,
    pub video_extensions: VideoExtensionTable,
}
