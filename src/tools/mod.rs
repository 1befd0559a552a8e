mod black_region_parser;
mod frame_extractor;
mod media_probe;
mod media_toolchain;
mod path_validator;
mod time_interval;
mod video_scanner;

pub use black_region_parser::{BlackRegionParseError, parse_black_regions};
pub use frame_extractor::{FrameExtractor, format_offset};
pub use media_probe::{MediaProbe, VideoMetadata};
pub use media_toolchain::{FfmpegToolchain, MediaToolchain, ProbeKind};
pub use path_validator::{ensure_directory_exists, validate_path_exists};
pub use time_interval::{TimeInterval, find_black_interval};
pub use video_scanner::{VideoFileInfo, scan_video_files};
