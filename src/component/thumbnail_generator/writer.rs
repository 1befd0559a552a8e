use super::sampler::ThumbnailSet;
use crate::tools::ensure_directory_exists;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 輸出檔名：`<影片檔名>-<序號>.<格式>`
#[must_use]
pub fn thumbnail_file_name(video_path: &Path, index: usize, format: &str) -> String {
    let name = video_path
        .file_name()
        .map_or_else(|| "video".to_string(), |s| s.to_string_lossy().to_string());
    format!("{name}-{index}.{format}")
}

/// 資料夾模式下單一影片的輸出位置
///
/// 保留影片相對於輸入資料夾的子目錄結構，避免不同子資料夾中
/// 同名影片的縮圖互相覆蓋。
#[must_use]
pub fn video_output_dir(input_dir: &Path, video_path: &Path, output_dir: &Path) -> PathBuf {
    video_path
        .parent()
        .and_then(|parent| parent.strip_prefix(input_dir).ok())
        .map_or_else(|| output_dir.to_path_buf(), |relative| output_dir.join(relative))
}

/// 將縮圖寫入輸出資料夾，回傳已寫入的檔案路徑
///
/// 收到中斷訊號時停止寫入，回傳目前已寫入的部分。
pub fn write_thumbnails(
    set: &ThumbnailSet,
    video_path: &Path,
    output_dir: &Path,
    format: &str,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<Vec<PathBuf>> {
    ensure_directory_exists(output_dir)?;

    let mut written = Vec::with_capacity(set.len());
    for (index, thumbnail) in set.thumbnails().iter().enumerate() {
        if shutdown_signal.load(Ordering::SeqCst) {
            break;
        }

        let path = output_dir.join(thumbnail_file_name(video_path, index, format));
        fs::write(&path, &thumbnail.data)
            .with_context(|| format!("無法寫入縮圖: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
