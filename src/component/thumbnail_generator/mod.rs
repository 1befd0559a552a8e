//! 影片縮圖產生元件
//!
//! 流程：
//! A. 探測影片長度、幀率與黑畫面區段（ffprobe）
//! B. 依取樣設定走訪時間軸，略過黑畫面
//! C. 逐一擷取縮圖（ffmpeg）
//! D. 寫入輸出資料夾

mod main;
mod sampler;
mod writer;

pub use main::{GenerationResult, ThumbnailGenerator};
pub use sampler::{START_CURSOR_SECONDS, Sampler, Thumbnail, ThumbnailSet, effective_interval};
pub use writer::{thumbnail_file_name, video_output_dir, write_thumbnails};
