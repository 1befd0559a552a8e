use super::black_region_parser::parse_black_regions;
use super::media_toolchain::{MediaToolchain, ProbeKind};
use super::time_interval::TimeInterval;
use crate::error::{Result, ThumbnailError};
use log::debug;
use std::path::Path;

/// 影片取樣所需的資訊，每次執行探測一次，之後唯讀
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub duration_seconds: f64,
    pub frame_rate_fps: f64,
    pub black_intervals: Vec<TimeInterval>,
}

/// 將 ffprobe 的文字輸出轉為型別化的值
pub struct MediaProbe<'a, T: MediaToolchain + ?Sized> {
    toolchain: &'a T,
}

impl<'a, T: MediaToolchain + ?Sized> MediaProbe<'a, T> {
    pub const fn new(toolchain: &'a T) -> Self {
        Self { toolchain }
    }

    /// 主視訊串流長度（秒）
    pub fn duration(&self, path: &Path) -> Result<f64> {
        let output = self.toolchain.probe(ProbeKind::Duration, path)?;
        parse_duration(&output).map_err(|reason| ThumbnailError::probe(path, reason))
    }

    /// 主視訊串流幀率，來源格式為 `N/D`
    pub fn frame_rate(&self, path: &Path) -> Result<f64> {
        let output = self.toolchain.probe(ProbeKind::FrameRate, path)?;
        parse_frame_rate(&output).map_err(|reason| ThumbnailError::probe(path, reason))
    }

    /// 黑畫面區段，依時間先後排列
    pub fn black_intervals(&self, path: &Path) -> Result<Vec<TimeInterval>> {
        let output = self.toolchain.probe(ProbeKind::BlackRegions, path)?;
        parse_black_regions(&output).map_err(|e| ThumbnailError::probe(path, e.to_string()))
    }

    /// 取得取樣所需的全部資訊；未啟用黑畫面過濾時不執行 blackdetect
    pub fn resolve_metadata(&self, path: &Path, detect_black: bool) -> Result<VideoMetadata> {
        let black_intervals = if detect_black {
            self.black_intervals(path)?
        } else {
            Vec::new()
        };
        let frame_rate_fps = self.frame_rate(path)?;
        let duration_seconds = self.duration(path)?;

        debug!(
            "影片資訊 {}: {duration_seconds:.2}s, {frame_rate_fps:.3} fps, {} 個黑畫面區段",
            path.display(),
            black_intervals.len()
        );

        Ok(VideoMetadata {
            duration_seconds,
            frame_rate_fps,
            black_intervals,
        })
    }
}

fn parse_duration(output: &str) -> std::result::Result<f64, String> {
    let text = output.replace('\n', "");
    let text = text.trim();
    let duration: f64 = text
        .parse()
        .map_err(|_| format!("duration is not a number: {text:?}"))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(format!("duration out of range: {text:?}"));
    }
    Ok(duration)
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"），兩邊都必須是整數
fn parse_frame_rate(output: &str) -> std::result::Result<f64, String> {
    let text = output.trim();
    let (num_str, den_str) = text
        .split_once('/')
        .ok_or_else(|| format!("frame rate is not N/D: {text:?}"))?;

    let num: i64 = num_str
        .parse()
        .map_err(|_| format!("frame rate numerator is not an integer: {text:?}"))?;
    let den: i64 = den_str
        .parse()
        .map_err(|_| format!("frame rate denominator is not an integer: {text:?}"))?;

    if den == 0 {
        return Err(format!("frame rate denominator is zero: {text:?}"));
    }

    Ok(num as f64 / den as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert!((parse_duration("125.458000\n").unwrap() - 125.458).abs() < 1e-9);
        assert!((parse_duration("  60 \n").unwrap() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("N/A\n").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-3").is_err());
        assert!(parse_duration("inf").is_err());
    }

    #[test]
    fn test_parse_frame_rate_fraction() {
        assert!((parse_frame_rate("30/1\n").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate(" 24/1 ").unwrap() - 24.0).abs() < 0.01);
    }

    #[test]
    fn test_parse_frame_rate_invalid() {
        assert!(parse_frame_rate("30000").is_err());
        assert!(parse_frame_rate("29.97/1").is_err());
        assert!(parse_frame_rate("30/x").is_err());
        assert!(parse_frame_rate("30/0").is_err());
    }
}
