//! Run orchestration.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info, warn};

use motiv_media::assemble_video;
use motiv_models::{FrameFailure, FrameResult, RunId};

use crate::config::RunConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::progress::{notify_bounded, ProgressSink};
use crate::traits::{FrameGenerator, SourceFetcher};

/// The photo-to-video pipeline.
///
/// Holds references to the two external collaborators; all per-run
/// state lives in local values so concurrent runs for different users
/// cannot interfere.
pub struct Pipeline<'a> {
    generator: &'a dyn FrameGenerator,
    files: &'a dyn SourceFetcher,
}

impl<'a> Pipeline<'a> {
    pub fn new(generator: &'a dyn FrameGenerator, files: &'a dyn SourceFetcher) -> Self {
        Self { generator, files }
    }

    /// Run one complete generation: source photo in, video path out.
    ///
    /// Run-fatal outcomes are source acquisition failure, missing the
    /// success quorum, and assembly failure. Individual frame failures
    /// are skipped.
    pub async fn run(
        &self,
        photo_reference: &str,
        style: &str,
        config: &RunConfig,
        progress: &dyn ProgressSink,
    ) -> PipelineResult<PathBuf> {
        let run_id = RunId::new();
        info!(run = %run_id.short(), style, frames = config.frame_count, "starting generation run");

        let frames = self
            .collect_frames(&run_id, photo_reference, style, config, progress)
            .await?;

        let output_path = config.output_dir.join(format!(
            "video_{}_{}.mp4",
            Utc::now().format("%Y%m%d_%H%M%S"),
            run_id.short()
        ));

        let payloads: Vec<Vec<u8>> = frames.into_iter().map(|f| f.payload).collect();
        let output_path = assemble_video(&payloads, &output_path, config.frame_rate).await?;

        info!(run = %run_id.short(), output = %output_path.display(), "generation run complete");
        Ok(output_path)
    }

    /// Download the source photo and generate frames up to the quorum
    /// rules. Returns successes in ascending frame-index order.
    pub async fn collect_frames(
        &self,
        run_id: &RunId,
        photo_reference: &str,
        style: &str,
        config: &RunConfig,
        progress: &dyn ProgressSink,
    ) -> PipelineResult<Vec<FrameResult>> {
        config.validate()?;

        let photo = self
            .files
            .resolve_and_download(photo_reference)
            .await
            .map_err(|e| {
                error!(run = %run_id.short(), error = %e, "source photo acquisition failed");
                PipelineError::SourceAcquisition(e)
            })?;

        // Per-run workspace; removed on drop no matter how we leave
        // this function.
        let workspace = tempfile::Builder::new()
            .prefix(&format!("motiv-{}-", run_id.short()))
            .tempdir()?;
        let source_path = workspace.path().join("source.jpg");
        tokio::fs::write(&source_path, &photo).await?;

        let mut successes: Vec<FrameResult> = Vec::with_capacity(config.frame_count as usize);
        let mut failures: Vec<FrameFailure> = Vec::new();

        for index in 0..config.frame_count {
            match self
                .generator
                .generate_frame(&photo, style, index, &config.params)
                .await
            {
                Ok(payload) => {
                    successes.push(FrameResult::new(index, payload));
                    notify_bounded(progress, successes.len() as u32, config.frame_count).await;
                }
                Err(e) => {
                    warn!(run = %run_id.short(), frame = index, error = %e, "frame failed, skipping");
                    failures.push(FrameFailure::new(index, e.to_string()));
                }
            }
        }

        let achieved = successes.len() as u32;
        let required = config.quorum();
        if achieved < required {
            error!(
                run = %run_id.short(),
                achieved,
                required,
                failed = failures.len(),
                "run missed frame quorum"
            );
            return Err(PipelineError::InsufficientFrames { achieved, required });
        }

        // The loop is sequential today, so this is already the case;
        // the ordering invariant must survive any future parallel
        // generation, so sort by index before handing off to assembly.
        successes.sort_by_key(|f| f.index);

        Ok(successes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use crate::progress::NoopProgress;
    use motiv_files::{FileError, FileResult};
    use motiv_models::{GenerationParams, UnknownStyle};
    use motiv_sd_client::{SdError, SdResult};

    /// Generator that fails exactly the scripted frame indices. Each
    /// success payload is the frame index, so ordering is observable.
    struct ScriptedGenerator {
        fail_indices: HashSet<u32>,
        calls: AtomicU32,
    }

    impl ScriptedGenerator {
        fn new(fail_indices: impl IntoIterator<Item = u32>) -> Self {
            Self {
                fail_indices: fail_indices.into_iter().collect(),
                calls: AtomicU32::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FrameGenerator for ScriptedGenerator {
        async fn generate_frame(
            &self,
            _photo: &[u8],
            _style: &str,
            frame_index: u32,
            _params: &GenerationParams,
        ) -> SdResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_indices.contains(&frame_index) {
                Err(SdError::Service {
                    status: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok(vec![frame_index as u8])
            }
        }
    }

    /// Generator that always reports an unknown style.
    struct UnknownStyleGenerator;

    #[async_trait]
    impl FrameGenerator for UnknownStyleGenerator {
        async fn generate_frame(
            &self,
            _photo: &[u8],
            style: &str,
            _frame_index: u32,
            _params: &GenerationParams,
        ) -> SdResult<Vec<u8>> {
            Err(SdError::UnknownStyle(UnknownStyle(style.to_string())))
        }
    }

    struct StaticFetcher {
        fail: bool,
        calls: AtomicU32,
    }

    impl StaticFetcher {
        fn ok() -> Self {
            Self {
                fail: false,
                calls: AtomicU32::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl SourceFetcher for StaticFetcher {
        async fn resolve_and_download(&self, _reference: &str) -> FileResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(FileError::Status { status: 404 })
            } else {
                Ok(b"source photo".to_vec())
            }
        }
    }

    struct RecordingProgress {
        events: Mutex<Vec<(u32, u32)>>,
    }

    impl RecordingProgress {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }

        fn events(&self) -> Vec<(u32, u32)> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProgressSink for RecordingProgress {
        async fn notify(&self, current: u32, total: u32) -> anyhow::Result<()> {
            self.events.lock().unwrap().push((current, total));
            Ok(())
        }
    }

    struct BrokenProgress;

    #[async_trait]
    impl ProgressSink for BrokenProgress {
        async fn notify(&self, _current: u32, _total: u32) -> anyhow::Result<()> {
            anyhow::bail!("notification channel down")
        }
    }

    fn run_id() -> RunId {
        RunId::new()
    }

    #[tokio::test]
    async fn test_all_frames_succeed() {
        let generator = ScriptedGenerator::new([]);
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);
        let progress = RecordingProgress::new();

        let frames = pipeline
            .collect_frames(&run_id(), "photo-ref", "anime", &RunConfig::default(), &progress)
            .await
            .unwrap();

        assert_eq!(frames.len(), 8);
        let indices: Vec<u32> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
        assert_eq!(generator.call_count(), 8);
    }

    #[tokio::test]
    async fn test_below_quorum_fails_with_counts() {
        // 5 of 8 fail, 3 succeed, quorum is 4.
        let generator = ScriptedGenerator::new([0, 2, 4, 6, 7]);
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);

        let err = pipeline
            .collect_frames(
                &run_id(),
                "photo-ref",
                "anime",
                &RunConfig::default(),
                &NoopProgress,
            )
            .await
            .unwrap_err();

        match err {
            PipelineError::InsufficientFrames { achieved, required } => {
                assert_eq!(achieved, 3);
                assert_eq!(required, 4);
            }
            other => panic!("expected InsufficientFrames, got {other:?}"),
        }
        // Every frame was still attempted.
        assert_eq!(generator.call_count(), 8);
    }

    #[tokio::test]
    async fn test_exact_quorum_passes_in_index_order() {
        // Even indices fail; 1, 3, 5, 7 succeed, meeting the quorum of 4.
        let generator = ScriptedGenerator::new([0, 2, 4, 6]);
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);

        let frames = pipeline
            .collect_frames(
                &run_id(),
                "photo-ref",
                "anime",
                &RunConfig::default(),
                &NoopProgress,
            )
            .await
            .unwrap();

        let indices: Vec<u32> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 3, 5, 7]);
        // Payloads carry the generating index.
        let payloads: Vec<u8> = frames.iter().map(|f| f.payload[0]).collect();
        assert_eq!(payloads, vec![1, 3, 5, 7]);
    }

    #[tokio::test]
    async fn test_source_failure_is_fatal_before_generation() {
        let generator = ScriptedGenerator::new([]);
        let fetcher = StaticFetcher::failing();
        let pipeline = Pipeline::new(&generator, &fetcher);

        let err = pipeline
            .collect_frames(
                &run_id(),
                "photo-ref",
                "anime",
                &RunConfig::default(),
                &NoopProgress,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::SourceAcquisition(_)));
        assert_eq!(generator.call_count(), 0, "no generation calls expected");
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_per_success() {
        let generator = ScriptedGenerator::new([1, 5]);
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);
        let progress = RecordingProgress::new();

        pipeline
            .collect_frames(&run_id(), "photo-ref", "anime", &RunConfig::default(), &progress)
            .await
            .unwrap();

        let events = progress.events();
        // One event per successful frame, counting up.
        assert_eq!(
            events,
            (1..=6).map(|i| (i, 8)).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_broken_progress_sink_does_not_abort_run() {
        let generator = ScriptedGenerator::new([]);
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);

        let frames = pipeline
            .collect_frames(
                &run_id(),
                "photo-ref",
                "anime",
                &RunConfig::default(),
                &BrokenProgress,
            )
            .await
            .unwrap();

        assert_eq!(frames.len(), 8);
    }

    #[tokio::test]
    async fn test_unknown_style_drains_into_quorum_failure() {
        let generator = UnknownStyleGenerator;
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);

        let err = pipeline
            .collect_frames(
                &run_id(),
                "photo-ref",
                "vaporwave",
                &RunConfig::default(),
                &NoopProgress,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::InsufficientFrames {
                achieved: 0,
                required: 4
            }
        ));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_any_call() {
        let generator = ScriptedGenerator::new([]);
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);

        let bad = RunConfig {
            min_success_fraction: 2.0,
            ..RunConfig::default()
        };

        let err = pipeline
            .collect_frames(&run_id(), "photo-ref", "anime", &bad, &NoopProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::InvalidConfig(_)));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(generator.call_count(), 0);
    }

    /// Generator returning real PNG bytes, for the end-to-end test.
    struct PngGenerator;

    #[async_trait]
    impl FrameGenerator for PngGenerator {
        async fn generate_frame(
            &self,
            _photo: &[u8],
            _style: &str,
            frame_index: u32,
            _params: &GenerationParams,
        ) -> SdResult<Vec<u8>> {
            use image::{ImageFormat, RgbImage};
            use std::io::Cursor;

            let level = (frame_index * 30) as u8;
            let img = RgbImage::from_pixel(16, 16, image::Rgb([level, level, level]));
            let mut buf = Cursor::new(Vec::new());
            image::DynamicImage::ImageRgb8(img)
                .write_to(&mut buf, ImageFormat::Png)
                .unwrap();
            Ok(buf.into_inner())
        }
    }

    // Requires a real ffmpeg binary; run with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_run_end_to_end_with_ffmpeg() {
        if motiv_media::check_ffmpeg().is_err() {
            eprintln!("ffmpeg not installed, skipping");
            return;
        }

        let generator = PngGenerator;
        let fetcher = StaticFetcher::ok();
        let pipeline = Pipeline::new(&generator, &fetcher);

        let output_dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            output_dir: output_dir.path().to_path_buf(),
            ..RunConfig::default()
        };

        let path = pipeline
            .run("photo-ref", "anime", &config, &NoopProgress)
            .await
            .unwrap();

        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("video_"));
    }
}
