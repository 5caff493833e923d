//! Frame-sequence video assembly.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Default output frame rate.
pub const DEFAULT_FRAME_RATE: u32 = 8;

/// Upper bound on one encode. Assembling a handful of small frames is
/// fast; anything near this long means ffmpeg is wedged.
const ENCODE_TIMEOUT_SECS: u64 = 120;

/// Assemble ordered image payloads into a silent H.264 video.
///
/// Each payload is written as a standalone image file into a temporary
/// workspace, in the exact order given, and encoded with ffmpeg at the
/// requested frame rate. The workspace is removed when this function
/// returns, on both success and failure paths.
pub async fn assemble_video(
    frames: &[Vec<u8>],
    output_path: impl AsRef<Path>,
    frame_rate: u32,
) -> MediaResult<PathBuf> {
    let output_path = output_path.as_ref();

    if frames.is_empty() {
        return Err(MediaError::NoFrames);
    }

    // Workspace is dropped (and deleted) on every exit path below.
    let workspace = TempDir::new()?;
    write_frame_files(workspace.path(), frames).await?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let pattern = workspace.path().join("frame_%05d.png");
    let cmd = FfmpegCommand::new(&pattern, output_path)
        .framerate(frame_rate)
        .video_codec("libx264")
        .pixel_format("yuv420p")
        .no_audio();

    FfmpegRunner::new()
        .with_timeout(ENCODE_TIMEOUT_SECS)
        .run(&cmd)
        .await?;

    if !output_path.exists() {
        return Err(MediaError::ffmpeg_failed(
            format!("output file missing: {}", output_path.display()),
            None,
            None,
        ));
    }

    info!(
        frames = frames.len(),
        frame_rate,
        output = %output_path.display(),
        "video assembled"
    );

    Ok(output_path.to_path_buf())
}

/// Write payloads as `frame_%05d.png` files in index order.
pub(crate) async fn write_frame_files(dir: &Path, frames: &[Vec<u8>]) -> MediaResult<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(frames.len());

    for (index, payload) in frames.iter().enumerate() {
        if payload.is_empty() {
            return Err(MediaError::InvalidFrame { index });
        }

        let path = dir.join(format!("frame_{:05}.png", index));
        fs::write(&path, payload).await?;
        paths.push(path);
    }

    debug!(count = paths.len(), "frame files written");
    Ok(paths)
}
