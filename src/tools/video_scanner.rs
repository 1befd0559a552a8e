use crate::config::VideoExtensionTable;
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct VideoFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 遞迴掃描資料夾中的影片，依檔案大小排序（由小到大）
pub fn scan_video_files(
    directory: &Path,
    video_extensions: &VideoExtensionTable,
) -> Result<Vec<VideoFileInfo>> {
    let mut video_files: Vec<VideoFileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| video_extensions.is_video_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(VideoFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
            })
        })
        .collect();

    video_files.sort_by(|a, b| a.size.cmp(&b.size).then_with(|| a.path.cmp(&b.path)));
    Ok(video_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_filters_and_sorts_by_size() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("big.mp4"), vec![0u8; 300]).unwrap();
        fs::write(nested.join("small.MKV"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join("notes.txt"), vec![0u8; 5]).unwrap();

        let table = VideoExtensionTable {
            video_file: vec![".mp4".to_string(), ".mkv".to_string()],
        };
        let files = scan_video_files(dir.path(), &table).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, nested.join("small.MKV"));
        assert_eq!(files[0].size, 10);
        assert_eq!(files[1].path, dir.path().join("big.mp4"));
    }
}
