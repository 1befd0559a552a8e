pub mod component;
pub mod config;
pub mod error;
pub mod signal;
pub mod tools;

pub use error::{Result, ThumbnailError};
