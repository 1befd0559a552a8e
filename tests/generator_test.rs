//! 縮圖產生器整合測試 - 假工具鏈 + 暫存資料夾

mod common;

use common::FakeToolchain;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tempfile::tempdir;
use thumbnail_gen::component::thumbnail_generator::{GenerationResult, ThumbnailGenerator};
use thumbnail_gen::config::{Config, ThumbnailSettings, VideoExtensionTable};

fn config() -> Config {
    Config {
        settings: ThumbnailSettings::default(),
        video_extensions: VideoExtensionTable {
            video_file: vec![".mp4".to_string(), ".mkv".to_string()],
        },
    }
}

#[test]
fn test_single_video_writes_numbered_files() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let video = input_dir.path().join("clip.mp4");
    fs::write(&video, b"not really a video").unwrap();

    let toolchain = FakeToolchain::new("100", "25/1").with_black_regions(&[(10.0, 30.0)]);
    let policy = ThumbnailSettings::default().to_policy();
    let generator = ThumbnailGenerator::new(
        config(),
        policy,
        toolchain,
        Arc::new(AtomicBool::new(false)),
    );

    let result = generator.run(&video, output_dir.path()).unwrap();
    assert_eq!(
        result,
        GenerationResult {
            total_videos: 1,
            successful: 1,
            failed: 0,
            thumbnails_written: 5,
        }
    );

    let first = fs::read(output_dir.path().join("clip.mp4-0.png")).unwrap();
    assert_eq!(first, b"png@00:00:01".to_vec());
    let second = fs::read(output_dir.path().join("clip.mp4-1.png")).unwrap();
    assert_eq!(second, b"png@00:00:31".to_vec());
    assert!(output_dir.path().join("clip.mp4-4.png").exists());
    assert!(!output_dir.path().join("clip.mp4-5.png").exists());
}

#[test]
fn test_single_video_failure_is_error_and_writes_nothing() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let video = input_dir.path().join("clip.mp4");
    fs::write(&video, b"x").unwrap();

    let mut toolchain = FakeToolchain::new("100", "25/1");
    toolchain.fail_at = Some("00:00:21".to_string());
    let generator = ThumbnailGenerator::new(
        config(),
        ThumbnailSettings::default().to_policy(),
        toolchain,
        Arc::new(AtomicBool::new(false)),
    );

    assert!(generator.run(&video, output_dir.path()).is_err());
    assert_eq!(fs::read_dir(output_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_directory_batch() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.mp4"), b"a").unwrap();
    fs::write(input_dir.path().join("b.mkv"), b"bb").unwrap();
    fs::write(input_dir.path().join("readme.txt"), b"skip").unwrap();

    let settings = ThumbnailSettings {
        max_thumbnails: 2,
        format: "mjpeg".to_string(),
        ..ThumbnailSettings::default()
    };
    let generator = ThumbnailGenerator::new(
        config(),
        settings.to_policy(),
        FakeToolchain::new("100", "25/1"),
        Arc::new(AtomicBool::new(false)),
    );

    let result = generator.run(input_dir.path(), output_dir.path()).unwrap();
    assert_eq!(result.total_videos, 2);
    assert_eq!(result.successful, 2);
    assert_eq!(result.thumbnails_written, 4);
    assert!(output_dir.path().join("a.mp4-1.mjpeg").exists());
    assert!(output_dir.path().join("b.mkv-0.mjpeg").exists());
}

#[test]
fn test_directory_batch_counts_failures() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.mp4"), b"a").unwrap();

    let generator = ThumbnailGenerator::new(
        config(),
        ThumbnailSettings::default().to_policy(),
        FakeToolchain::new("garbage", "25/1"),
        Arc::new(AtomicBool::new(false)),
    );

    let result = generator.run(input_dir.path(), output_dir.path()).unwrap();
    assert_eq!(result.total_videos, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(result.thumbnails_written, 0);
}

#[test]
fn test_shutdown_stops_batch() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.mp4"), b"a").unwrap();

    let generator = ThumbnailGenerator::new(
        config(),
        ThumbnailSettings::default().to_policy(),
        FakeToolchain::new("100", "25/1"),
        Arc::new(AtomicBool::new(true)),
    );

    let result = generator.run(input_dir.path(), output_dir.path()).unwrap();
    assert_eq!(result.successful, 0);
    assert_eq!(result.thumbnails_written, 0);
}

#[test]
fn test_missing_input_is_error() {
    let dir = tempdir().unwrap();
    let generator = ThumbnailGenerator::new(
        config(),
        ThumbnailSettings::default().to_policy(),
        FakeToolchain::new("100", "25/1"),
        Arc::new(AtomicBool::new(false)),
    );
    assert!(generator.run(&dir.path().join("nope.mp4"), dir.path()).is_err());
}

#[test]
fn test_directory_batch_keeps_same_named_videos_apart() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::create_dir_all(input_dir.path().join("a")).unwrap();
    fs::create_dir_all(input_dir.path().join("b")).unwrap();
    fs::write(input_dir.path().join("a/clip.mp4"), b"a").unwrap();
    fs::write(input_dir.path().join("b/clip.mp4"), b"bb").unwrap();

    let settings = ThumbnailSettings {
        max_thumbnails: 2,
        ..ThumbnailSettings::default()
    };
    let generator = ThumbnailGenerator::new(
        config(),
        settings.to_policy(),
        FakeToolchain::new("100", "25/1"),
        Arc::new(AtomicBool::new(false)),
    );

    let result = generator.run(input_dir.path(), output_dir.path()).unwrap();
    assert_eq!(result.successful, 2);
    assert_eq!(result.thumbnails_written, 4);

    let files_on_disk: usize = ["a", "b"]
        .iter()
        .map(|sub| fs::read_dir(output_dir.path().join(sub)).unwrap().count())
        .sum();
    assert_eq!(files_on_disk, result.thumbnails_written);
    assert!(output_dir.path().join("a/clip.mp4-0.png").exists());
    assert!(output_dir.path().join("b/clip.mp4-1.png").exists());
}
