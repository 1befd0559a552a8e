use crate::error::{Result, ThumbnailError};
use log::debug;
use std::path::Path;
use std::process::{Command, Output};

/// 探測種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Duration,
    FrameRate,
    BlackRegions,
}

/// 外部媒體工具的能力介面
///
/// 取樣邏輯只透過這個 trait 與 ffprobe / ffmpeg 溝通，
/// 測試時可以換成回傳固定文字與位元組的假實作。
pub trait MediaToolchain {
    /// 執行一次探測並回傳原始 stdout 文字
    fn probe(&self, kind: ProbeKind, path: &Path) -> Result<String>;

    /// 在 `offset`（`HH:MM:SS`）擷取單一影格，回傳編碼後的圖片
    fn extract_frame(&self, path: &Path, offset: &str, format: &str, scale: &str)
    -> Result<Vec<u8>>;
}

/// 以 ffprobe / ffmpeg 子行程實作的工具鏈
#[derive(Debug, Clone)]
pub struct FfmpegToolchain {
    ffprobe: String,
    ffmpeg: String,
}

impl Default for FfmpegToolchain {
    fn default() -> Self {
        Self::new("ffprobe", "ffmpeg")
    }
}

impl FfmpegToolchain {
    #[must_use]
    pub fn new(ffprobe: impl Into<String>, ffmpeg: impl Into<String>) -> Self {
        Self {
            ffprobe: ffprobe.into(),
            ffmpeg: ffmpeg.into(),
        }
    }

    #[must_use]
    pub fn build_probe_command(&self, kind: ProbeKind, path: &Path) -> Command {
        let mut cmd = Command::new(&self.ffprobe);

        match kind {
            ProbeKind::Duration => {
                cmd.args([
                    "-v",
                    "quiet",
                    "-select_streams",
                    "v:0",
                    "-show_entries",
                    "stream=duration",
                    "-of",
                    "default=noprint_wrappers=1:nokey=1",
                ]);
                cmd.arg(path);
            }
            ProbeKind::FrameRate => {
                cmd.args([
                    "-v",
                    "0",
                    "-of",
                    "csv=p=0",
                    "-select_streams",
                    "v:0",
                    "-show_entries",
                    "stream=r_frame_rate",
                ]);
                cmd.arg(path);
            }
            ProbeKind::BlackRegions => {
                // blackdetect 只能透過 lavfi 的 movie 來源讀取檔案
                let graph = format!("movie={},blackdetect[out0]", path.display());
                cmd.args(["-f", "lavfi", "-i", &graph]);
                cmd.args([
                    "-show_entries",
                    "tags=lavfi.black_start,lavfi.black_end",
                    "-of",
                    "default=nw=1",
                    "-v",
                    "quiet",
                ]);
            }
        }

        cmd
    }

    #[must_use]
    pub fn build_extract_command(
        &self,
        path: &Path,
        offset: &str,
        format: &str,
        scale: &str,
    ) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-hide_banner", "-loglevel", "error", "-ss", offset, "-i"]);
        cmd.arg(path);
        cmd.args([
            "-frames:v",
            "1",
            "-vf",
            &format!("scale={scale}"),
            "-c:v",
            format,
            "-f",
            "image2pipe",
            "-",
        ]);
        cmd
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {stderr}", output.status)
    }
}

impl MediaToolchain for FfmpegToolchain {
    fn probe(&self, kind: ProbeKind, path: &Path) -> Result<String> {
        debug!("ffprobe 探測 {kind:?}: {}", path.display());

        let output = self
            .build_probe_command(kind, path)
            .output()
            .map_err(|e| ThumbnailError::probe(path, format!("cannot run {}: {e}", self.ffprobe)))?;

        if !output.status.success() {
            return Err(ThumbnailError::probe(path, failure_reason(&output)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn extract_frame(
        &self,
        path: &Path,
        offset: &str,
        format: &str,
        scale: &str,
    ) -> Result<Vec<u8>> {
        debug!("ffmpeg 擷取影格 {offset} ({format}, scale={scale}): {}", path.display());

        let output = self
            .build_extract_command(path, offset, format, scale)
            .output()
            .map_err(|e| ThumbnailError::ExtractFailed {
                timestamp: 0,
                reason: format!("cannot run {}: {e}", self.ffmpeg),
            })?;

        if !output.status.success() {
            return Err(ThumbnailError::ExtractFailed {
                timestamp: 0,
                reason: failure_reason(&output),
            });
        }

        Ok(output.stdout)
    }
}
