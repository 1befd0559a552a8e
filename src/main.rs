use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::Input;
use log::{info, warn};
use std::path::PathBuf;
use thumbnail_gen::component::ThumbnailGenerator;
use thumbnail_gen::config::{Config, DEFAULT_SETTINGS_FILE, PolicyOverrides};
use thumbnail_gen::signal::setup_shutdown_signal;
use thumbnail_gen::tools::FfmpegToolchain;

/// 從影片中依固定間隔擷取縮圖
#[derive(Parser, Debug)]
#[command(name = "thumbnail-gen", version, about, long_about = None)]
struct Args {
    /// Path to a video file or a directory of videos (prompted when omitted)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Seconds between thumbnails; with --segments, the number of segments [default: 20]
    #[arg(long, allow_negative_numbers = true)]
    interval: Option<i64>,

    /// Max thumbnails per video, 0 = as many as the interval allows [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    max: Option<i64>,

    /// Skip frames inside detected black regions (expensive) [default: true]
    #[arg(long, action = clap::ArgAction::Set)]
    filter: Option<bool>,

    /// Output codec / file extension [default: png]
    #[arg(long)]
    format: Option<String>,

    /// Treat --interval as the number of evenly spaced segments (`--segments false` turns it off)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = clap::ArgAction::Set)]
    segments: Option<bool>,

    /// Advance by whole frames starting at frame 0 instead of seconds starting at 1s
    #[arg(long, num_args = 0..=1, default_missing_value = "true", action = clap::ArgAction::Set)]
    frame_step: Option<bool>,

    /// Scale width, -1 = keep aspect ratio [default: -1]
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i32>,

    /// Scale height, -1 = keep aspect ratio [default: -1]
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i32>,

    /// Directory the thumbnails are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Settings file layered under the command line flags
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
}

impl Args {
    /// `--interval` 依最終的片段模式（旗標優先，其次設定檔）決定覆寫哪個欄位
    fn overrides(&self, settings_use_segments: bool) -> PolicyOverrides {
        let segment_mode = self.segments.unwrap_or(settings_use_segments);
        PolicyOverrides {
            interval_seconds: self.interval.filter(|_| !segment_mode),
            use_segments: self.segments,
            segments: self.interval.filter(|_| segment_mode),
            frame_stepping: self.frame_step,
            max_thumbnails: self.max,
            format: self.format.clone(),
            width: self.width,
            height: self.height,
            enable_black_filter: self.filter,
        }
    }
}

fn prompt_input_path() -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("請輸入影片或資料夾路徑")
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let shutdown_signal = setup_shutdown_signal()?;

    let config = Config::load(&args.config)?;
    let settings = config
        .settings
        .with_overrides(args.overrides(config.settings.use_segments));
    let policy = settings.to_policy();
    let toolchain = FfmpegToolchain::new(&settings.ffprobe_path, &settings.ffmpeg_path);

    let input = match &args.path {
        Some(path) => path.clone(),
        None => prompt_input_path()?,
    };

    let generator = ThumbnailGenerator::new(config, policy, toolchain, shutdown_signal);

    match generator.run(&input, &args.output_dir) {
        Ok(result) => {
            println!(
                "{} Extracted {} thumbnails from {}/{} videos",
                style("✓").green(),
                result.thumbnails_written,
                result.successful,
                result.total_videos
            );
            if result.failed > 0 {
                println!("  {}", style(format!("失敗: {} 個", result.failed)).red());
            }
            info!(
                "縮圖產生完成 - 成功: {}, 失敗: {}, 縮圖: {}",
                result.successful, result.failed, result.thumbnails_written
            );
            Ok(())
        }
        Err(e) => {
            warn!("Program error: {e:#}");
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            std::process::exit(1);
        }
    }
}
