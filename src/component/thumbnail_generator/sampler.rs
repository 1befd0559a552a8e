use crate::config::{IntervalMode, SamplingPolicy, Stepping};
use crate::error::{Result, ThumbnailError};
use crate::tools::{FrameExtractor, MediaProbe, MediaToolchain, VideoMetadata, find_black_interval};
use log::debug;
use std::path::Path;

/// 秒數模式的起始游標，避開片頭常見的黑畫面與淡入
pub const START_CURSOR_SECONDS: f64 = 1.0;

/// 單張縮圖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub timestamp_seconds: u64,
    pub data: Vec<u8>,
}

/// 依時間先後排列的縮圖集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSet {
    thumbnails: Vec<Thumbnail>,
}

impl ThumbnailSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    #[must_use]
    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    #[must_use]
    pub fn timestamps(&self) -> Vec<u64> {
        self.thumbnails.iter().map(|t| t.timestamp_seconds).collect()
    }

    #[must_use]
    pub fn into_images(self) -> Vec<Vec<u8>> {
        self.thumbnails.into_iter().map(|t| t.data).collect()
    }
}

/// 取樣間隔（秒）
///
/// 片段模式以 `floor(duration / count)` 推算一次，之後不再調整。
/// 結果為 0 或負數時游標無法前進，直接回傳 `InvalidPolicy`。
pub fn effective_interval(policy: &SamplingPolicy, duration_seconds: f64) -> Result<u64> {
    match policy.mode {
        IntervalMode::Fixed { seconds } => u64::try_from(seconds)
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| {
                ThumbnailError::InvalidPolicy(format!("interval must be positive, got {seconds}"))
            }),
        IntervalMode::Segments { count } => {
            if count <= 0 {
                return Err(ThumbnailError::InvalidPolicy(format!(
                    "segment count must be positive, got {count}"
                )));
            }
            let interval = (duration_seconds / count as f64).floor();
            if interval < 1.0 {
                return Err(ThumbnailError::InvalidPolicy(format!(
                    "{count} segments over {duration_seconds:.2}s leaves a zero interval"
                )));
            }
            Ok(interval as u64)
        }
    }
}

/// 縮圖取樣器
///
/// 依設定走訪時間軸，略過黑畫面區段，在每個保留的時間點擷取一張圖片。
/// 任何一張擷取失敗都會中止整次執行，不回傳部分結果。
pub struct Sampler<'a, T: MediaToolchain + ?Sized> {
    toolchain: &'a T,
}

impl<'a, T: MediaToolchain + ?Sized> Sampler<'a, T> {
    pub const fn new(toolchain: &'a T) -> Self {
        Self { toolchain }
    }

    /// 探測影片資訊後取樣
    pub fn run(&self, path: &Path, policy: &SamplingPolicy) -> Result<ThumbnailSet> {
        let metadata =
            MediaProbe::new(self.toolchain).resolve_metadata(path, policy.enable_black_filter)?;
        self.sample(path, policy, &metadata)
    }

    /// 以已取得的影片資訊取樣
    pub fn sample(
        &self,
        path: &Path,
        policy: &SamplingPolicy,
        metadata: &VideoMetadata,
    ) -> Result<ThumbnailSet> {
        let interval = effective_interval(policy, metadata.duration_seconds)?;

        match policy.stepping {
            Stepping::Seconds => self.sample_by_seconds(path, policy, metadata, interval),
            Stepping::Frames => self.sample_by_frames(path, policy, metadata, interval),
        }
    }

    fn sample_by_seconds(
        &self,
        path: &Path,
        policy: &SamplingPolicy,
        metadata: &VideoMetadata,
        interval: u64,
    ) -> Result<ThumbnailSet> {
        let mut set = ThumbnailSet::default();
        let mut cursor = START_CURSOR_SECONDS;

        loop {
            if policy.limit_reached(set.len()) || cursor >= metadata.duration_seconds {
                break;
            }

            if policy.enable_black_filter {
                if let Some(black) = find_black_interval(cursor, &metadata.black_intervals) {
                    debug!(
                        "{cursor:.2}s 位於黑畫面 [{:.2}, {:.2}]，跳至 {:.2}s",
                        black.start(),
                        black.end(),
                        black.end() + 1.0
                    );
                    cursor = black.end() + 1.0;
                    continue;
                }
            }

            self.accept(&mut set, path, policy, cursor.floor() as u64)?;
            cursor += interval as f64;
        }

        Ok(set)
    }

    fn sample_by_frames(
        &self,
        path: &Path,
        policy: &SamplingPolicy,
        metadata: &VideoMetadata,
        interval: u64,
    ) -> Result<ThumbnailSet> {
        let fps = metadata.frame_rate_fps;
        if !(fps.is_finite() && fps > 0.0) {
            return Err(ThumbnailError::InvalidPolicy(format!(
                "frame stepping needs a positive frame rate, got {fps}"
            )));
        }

        let frame_step = (fps.trunc() as u64).saturating_mul(interval);
        if frame_step == 0 {
            return Err(ThumbnailError::InvalidPolicy(format!(
                "frame rate {fps:.3} is too low for frame stepping"
            )));
        }

        let mut set = ThumbnailSet::default();
        let mut next_frame = Some(0_u64);

        // 幀數溢位時視為已走到時間軸盡頭
        while let Some(frame) = next_frame {
            let time = frame as f64 / fps;
            if policy.limit_reached(set.len()) || time >= metadata.duration_seconds {
                break;
            }

            next_frame = frame.checked_add(frame_step);

            if policy.enable_black_filter
                && find_black_interval(time, &metadata.black_intervals).is_some()
            {
                debug!("{time:.2}s 位於黑畫面，略過");
                continue;
            }

            self.accept(&mut set, path, policy, time.floor() as u64)?;
        }

        Ok(set)
    }

    fn accept(
        &self,
        set: &mut ThumbnailSet,
        path: &Path,
        policy: &SamplingPolicy,
        timestamp_seconds: u64,
    ) -> Result<()> {
        let data = FrameExtractor::new(self.toolchain).extract(
            path,
            timestamp_seconds,
            &policy.format,
            &policy.scale.to_string(),
        )?;

        debug!("擷取 {timestamp_seconds}s: {} bytes", data.len());

        set.thumbnails.push(Thumbnail {
            timestamp_seconds,
            data,
        });
        Ok(())
    }
}
