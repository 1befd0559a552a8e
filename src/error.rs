use std::path::PathBuf;
use thiserror::Error;

/// 縮圖產生流程的錯誤種類
///
/// 所有錯誤都直接回傳給呼叫端，核心流程內不做重試也不記錄日誌。
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// 媒體探測失敗：無法執行 ffprobe，或輸出格式不符
    #[error("probe failed for {path}: {reason}")]
    ProbeFailed { path: PathBuf, reason: String },

    /// 單一時間點的影格擷取失敗
    #[error("frame extraction failed at {timestamp}s: {reason}")]
    ExtractFailed { timestamp: u64, reason: String },

    /// 取樣設定會導致無法前進（間隔 <= 0）
    #[error("invalid sampling policy: {0}")]
    InvalidPolicy(String),
}

impl ThumbnailError {
    pub(crate) fn probe(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
