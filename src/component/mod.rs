//! 功能元件模組

pub mod thumbnail_generator;

pub use thumbnail_generator::ThumbnailGenerator;
