use super::sampler::Sampler;
use super::writer::{video_output_dir, write_thumbnails};
use crate::config::{Config, SamplingPolicy};
use crate::tools::{MediaToolchain, scan_video_files, validate_path_exists};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 縮圖產生結果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub total_videos: usize,
    pub successful: usize,
    pub failed: usize,
    pub thumbnails_written: usize,
}

/// 縮圖產生器
///
/// 輸入可以是單一影片或資料夾。單一影片失敗時直接回傳錯誤；
/// 資料夾模式下個別影片失敗只記錄並繼續處理下一個。
pub struct ThumbnailGenerator<T: MediaToolchain> {
    config: Config,
    policy: SamplingPolicy,
    toolchain: T,
    shutdown_signal: Arc<AtomicBool>,
}

impl<T: MediaToolchain> ThumbnailGenerator<T> {
    pub fn new(
        config: Config,
        policy: SamplingPolicy,
        toolchain: T,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            policy,
            toolchain,
            shutdown_signal,
        }
    }

    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<GenerationResult> {
        validate_path_exists(input)?;

        if input.is_dir() {
            return self.process_directory(input, output_dir);
        }

        let written = self.process_single_video(input, output_dir)?;
        Ok(GenerationResult {
            total_videos: 1,
            successful: 1,
            failed: 0,
            thumbnails_written: written.len(),
        })
    }

    fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<GenerationResult> {
        let videos = scan_video_files(input_dir, &self.config.video_extensions)?;

        if videos.is_empty() {
            println!("{}", style("找不到任何影片檔案").yellow());
            return Ok(GenerationResult::default());
        }

        println!(
            "{}",
            style(format!("找到 {} 個影片檔案，依檔案大小排序（由小到大）", videos.len())).green()
        );

        let mut result = GenerationResult {
            total_videos: videos.len(),
            ..GenerationResult::default()
        };

        let progress_bar = ProgressBar::new(videos.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );

        for video in &videos {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止處理");
                progress_bar.abandon_with_message("操作已中斷");
                break;
            }

            let video_name = video
                .path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            progress_bar.set_message(video_name.clone());

            let video_output = video_output_dir(input_dir, &video.path, output_dir);
            match self.process_single_video(&video.path, &video_output) {
                Ok(written) => {
                    result.successful += 1;
                    result.thumbnails_written += written.len();
                }
                Err(e) => {
                    error!("處理影片失敗 {video_name}: {e:#}");
                    progress_bar.println(format!("  {} {video_name}: {e:#}", style("✗").red()));
                    result.failed += 1;
                }
            }
            progress_bar.inc(1);
        }

        if !progress_bar.is_finished() {
            progress_bar.finish_with_message("完成");
        }

        Ok(result)
    }

    fn process_single_video(&self, video_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let thumbnails = Sampler::new(&self.toolchain)
            .run(video_path, &self.policy)
            .with_context(|| format!("無法產生縮圖: {}", video_path.display()))?;

        let written = write_thumbnails(
            &thumbnails,
            video_path,
            output_dir,
            &self.policy.format,
            &self.shutdown_signal,
        )?;

        info!(
            "已擷取 {} 張縮圖: {}",
            written.len(),
            video_path.display()
        );

        Ok(written)
    }
}
