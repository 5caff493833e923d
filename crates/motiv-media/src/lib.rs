//! FFmpeg CLI wrapper for frame-sequence video assembly.
//!
//! This crate turns an ordered list of encoded image payloads into one
//! silent video file. Frames are materialized into a scoped temporary
//! workspace that is removed on every exit path, success or failure.

pub mod assemble;
pub mod command;
pub mod error;

pub use assemble::{assemble_video, DEFAULT_FRAME_RATE};
pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
