pub mod load;
pub mod types;

pub use load::DEFAULT_SETTINGS_FILE;
pub use types::{
    Config, DEFAULT_FORMAT, DEFAULT_INTERVAL_SECONDS, DEFAULT_SEGMENTS, IntervalMode,
    PolicyOverrides, SamplingPolicy, ScaleExpr, Stepping, ThumbnailSettings, VideoExtensionTable,
};
