//! 測試用的假工具鏈：回傳固定文字與位元組，並記錄收到的呼叫

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;
use thumbnail_gen::tools::{MediaToolchain, ProbeKind};
use thumbnail_gen::{Result, ThumbnailError};

#[derive(Default)]
pub struct FakeToolchain {
    pub duration: String,
    pub frame_rate: String,
    pub black_regions: String,
    /// 在這個 offset 擷取時回傳失敗
    pub fail_at: Option<String>,
    /// 探測失敗的種類
    pub fail_probe: Option<ProbeKind>,
    pub probes: RefCell<Vec<ProbeKind>>,
    pub extractions: RefCell<Vec<(String, String, String)>>,
}

impl FakeToolchain {
    pub fn new(duration: &str, frame_rate: &str) -> Self {
        Self {
            duration: format!("{duration}\n"),
            frame_rate: format!("{frame_rate}\n"),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_black_regions(mut self, pairs: &[(f64, f64)]) -> Self {
        self.black_regions = pairs
            .iter()
            .map(|(start, end)| {
                format!("TAG:lavfi.black_start={start}\nTAG:lavfi.black_end={end}\n")
            })
            .collect();
        self
    }

    pub fn offsets(&self) -> Vec<String> {
        self.extractions
            .borrow()
            .iter()
            .map(|(offset, _, _)| offset.clone())
            .collect()
    }
}

impl MediaToolchain for FakeToolchain {
    fn probe(&self, kind: ProbeKind, path: &Path) -> Result<String> {
        self.probes.borrow_mut().push(kind);

        if self.fail_probe == Some(kind) {
            return Err(ThumbnailError::ProbeFailed {
                path: path.to_path_buf(),
                reason: "exited with exit status: 1".to_string(),
            });
        }

        Ok(match kind {
            ProbeKind::Duration => self.duration.clone(),
            ProbeKind::FrameRate => self.frame_rate.clone(),
            ProbeKind::BlackRegions => self.black_regions.clone(),
        })
    }

    fn extract_frame(
        &self,
        _path: &Path,
        offset: &str,
        format: &str,
        scale: &str,
    ) -> Result<Vec<u8>> {
        self.extractions
            .borrow_mut()
            .push((offset.to_string(), format.to_string(), scale.to_string()));

        if self.fail_at.as_deref() == Some(offset) {
            return Err(ThumbnailError::ExtractFailed {
                timestamp: 0,
                reason: "exited with exit status: 1".to_string(),
            });
        }

        Ok(format!("{format}@{offset}").into_bytes())
    }
}
