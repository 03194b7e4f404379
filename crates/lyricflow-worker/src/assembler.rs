//! Lyric video assembly pipeline.
//!
//! One assembler run turns an uploaded audio file and a lyric sheet into
//! `{output_dir}/{job_id}.mp4`, reporting progress to the job store at
//! fixed milestones:
//!
//! | step                           | progress        |
//! |--------------------------------|-----------------|
//! | started                        | 10              |
//! | audio probed                   | 20              |
//! | presets resolved               | 30              |
//! | background described           | 40              |
//! | lyric overlays                 | 40 → 80         |
//! | composition ready              | 85              |
//! | encoding                       | 85 → 99         |
//! | done                           | 100             |

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn, Instrument};

use lyricflow_media::{
    plan_slices, probe_audio, CaptionOverlay, FfmpegCommand, FfmpegRunner, LyricComposition,
};
use lyricflow_models::{GenerateRequest, JobId, JobUpdate};
use lyricflow_store::JobStore;

use crate::config::RenderConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::JobLogger;

const PROGRESS_STARTED: u8 = 10;
const PROGRESS_PROBED: u8 = 20;
const PROGRESS_PRESETS: u8 = 30;
const PROGRESS_BACKGROUND: u8 = 40;
const PROGRESS_OVERLAYS: u8 = 80;
const PROGRESS_COMPOSED: u8 = 85;
const PROGRESS_ENCODED: u8 = 99;

/// Progress reached after building overlay `index` of `count`.
pub fn overlay_progress(index: usize, count: usize) -> u8 {
    if count == 0 {
        return PROGRESS_BACKGROUND;
    }
    let span = usize::from(PROGRESS_OVERLAYS - PROGRESS_BACKGROUND);
    PROGRESS_BACKGROUND + (index.min(count) * span / count) as u8
}

/// Resolve an uploaded file name inside `upload_dir`. Names that are not a
/// single plain path component never resolve.
pub fn resolve_upload(upload_dir: &Path, filename: &str) -> Option<PathBuf> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if !filename.contains('\\') => {
            let path = upload_dir.join(name);
            path.is_file().then_some(path)
        }
        _ => None,
    }
}

/// Renders lyric videos and records their progress.
#[derive(Clone)]
pub struct VideoAssembler {
    config: Arc<RenderConfig>,
    store: Arc<dyn JobStore>,
    runner: Arc<FfmpegRunner>,
}

impl VideoAssembler {
    pub fn new(config: Arc<RenderConfig>, store: Arc<dyn JobStore>) -> Self {
        Self {
            config,
            store,
            runner: Arc::new(FfmpegRunner::new()),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Run the pipeline for `job_id`. Every failure is recorded in the job
    /// record; nothing is returned to the caller.
    pub async fn run(&self, job_id: JobId, request: GenerateRequest) {
        let logger = JobLogger::new(&job_id, "lyric_video");
        let span = logger.create_span();

        async {
            let started = Instant::now();
            logger.log_start(&format!(
                "{} lines, style={}, platform={}",
                request.lyrics.len(),
                request.lyric_style(),
                request.target_platform()
            ));

            match self.assemble(&job_id, &request, &logger).await {
                Ok(video_url) => {
                    metrics::counter!("lyricflow_jobs_completed_total").increment(1);
                    metrics::histogram!("lyricflow_job_duration_seconds")
                        .record(started.elapsed().as_secs_f64());
                    logger.log_completion(&video_url);
                }
                Err(e) => {
                    metrics::counter!("lyricflow_jobs_failed_total").increment(1);
                    let message = e.to_string();
                    logger.log_error(&message);
                    if let Err(store_err) =
                        self.store.update(&job_id, JobUpdate::failed(message)).await
                    {
                        warn!(error = %store_err, "Failed to record job failure");
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn assemble(
        &self,
        job_id: &JobId,
        request: &GenerateRequest,
        logger: &JobLogger,
    ) -> WorkerResult<String> {
        self.store
            .update(job_id, JobUpdate::started(PROGRESS_STARTED))
            .await?;

        // Audio
        let audio_path = resolve_upload(&self.config.upload_dir, &request.audio_filename)
            .ok_or(WorkerError::AudioNotFound)?;
        let audio = probe_audio(&audio_path).await?;
        info!(
            duration = audio.duration,
            codec = %audio.codec,
            sample_rate = audio.sample_rate,
            channels = audio.channels,
            "Probed audio"
        );
        self.advance(job_id, logger, PROGRESS_PROBED, "audio probed").await?;

        // Presets
        let style = request.lyric_style().preset();
        let frame = request.target_platform().frame_size();
        let font = self.config.font_for(style.font_weight);
        self.advance(job_id, logger, PROGRESS_PRESETS, "presets resolved")
            .await?;

        // Background
        let workdir = tempfile::Builder::new()
            .prefix("lyricflow-")
            .tempdir()
            .map_err(|e| WorkerError::work_dir(e.to_string()))?;
        let mut composition =
            LyricComposition::new(style, frame, audio.duration, self.config.encoding.fps);
        self.advance(job_id, logger, PROGRESS_BACKGROUND, "background ready")
            .await?;

        // Lyric overlays
        let slices = plan_slices(&request.lyrics, audio.duration);
        let count = slices.len();
        for slice in slices {
            let index = slice.index;
            let overlay =
                CaptionOverlay::build(slice, &style, frame, &font, workdir.path()).await?;
            composition.push_overlay(overlay);
            self.store
                .update(job_id, JobUpdate::progress(overlay_progress(index, count)))
                .await?;
        }
        self.advance(job_id, logger, PROGRESS_OVERLAYS, "overlays built")
            .await?;

        // Composite with audio
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        let output = self.config.output_dir.join(job_id.output_filename());
        let command = composition
            .into_command(&audio_path, &output, workdir.path(), &self.config.encoding)
            .await?;
        self.advance(job_id, logger, PROGRESS_COMPOSED, "composition ready")
            .await?;

        // Encode
        self.encode(job_id, &command, audio.duration).await?;

        let video_url = job_id.download_url();
        self.store
            .update(job_id, JobUpdate::completed(video_url.clone()))
            .await?;

        // The work directory is removed when `workdir` drops
        Ok(video_url)
    }

    async fn advance(
        &self,
        job_id: &JobId,
        logger: &JobLogger,
        progress: u8,
        message: &str,
    ) -> WorkerResult<()> {
        self.store
            .update(job_id, JobUpdate::progress(progress))
            .await?;
        logger.log_progress(progress, message);
        Ok(())
    }

    /// Run FFmpeg, forwarding its progress into the 85-99 band.
    async fn encode(
        &self,
        job_id: &JobId,
        command: &FfmpegCommand,
        duration_secs: f64,
    ) -> WorkerResult<()> {
        let total_ms = (duration_secs * 1000.0) as i64;
        let (tx, mut rx) = mpsc::unbounded_channel::<u8>();

        let encode = self.runner.run_with_progress(command, move |p| {
            debug!(speed = p.speed, eta_secs = ?p.eta_seconds(total_ms), "Encoding");
            let _ = tx.send(p.scaled(total_ms, PROGRESS_COMPOSED, PROGRESS_ENCODED));
        });

        let forward = async {
            let mut last = PROGRESS_COMPOSED;
            while let Some(progress) = rx.recv().await {
                if progress > last {
                    last = progress;
                    if let Err(e) = self.store.update(job_id, JobUpdate::progress(progress)).await {
                        warn!(error = %e, "Failed to record encode progress");
                    }
                }
            }
        };

        let (result, ()) = tokio::join!(encode, forward);
        result?;
        Ok(())
    }
}
