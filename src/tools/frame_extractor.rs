use super::media_toolchain::MediaToolchain;
use crate::error::{Result, ThumbnailError};
use std::path::Path;

/// 將秒數轉為 ffmpeg `-ss` 使用的 `HH:MM:SS`
///
/// 只支援整數秒；小時不以 24 取餘。
#[must_use]
pub fn format_offset(timestamp_seconds: u64) -> String {
    let hours = timestamp_seconds / 3600;
    let minutes = (timestamp_seconds % 3600) / 60;
    let seconds = timestamp_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// 單一影格擷取
pub struct FrameExtractor<'a, T: MediaToolchain + ?Sized> {
    toolchain: &'a T,
}

impl<'a, T: MediaToolchain + ?Sized> FrameExtractor<'a, T> {
    pub const fn new(toolchain: &'a T) -> Self {
        Self { toolchain }
    }

    /// 在指定秒數擷取一張圖片，失敗時不回傳任何部分輸出
    pub fn extract(
        &self,
        path: &Path,
        timestamp_seconds: u64,
        format: &str,
        scale: &str,
    ) -> Result<Vec<u8>> {
        let offset = format_offset(timestamp_seconds);

        self.toolchain
            .extract_frame(path, &offset, format, scale)
            .map_err(|e| ThumbnailError::ExtractFailed {
                timestamp: timestamp_seconds,
                reason: match e {
                    ThumbnailError::ExtractFailed { reason, .. } => reason,
                    other => other.to_string(),
                },
            })
    }
}
