use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::decoder::Decoder;
use crate::assets::discover::MediaBundle;
use crate::assets::media::AudioTrack;
use crate::caption::overlay::build_overlays;
use crate::caption::text::CaptionSet;
use crate::compose::frame::{FrameCompositor, FrameRGBA, Scene};
use crate::compose::spec::RenderSpec;
use crate::encode::encoder::{AudioInput, EncodeConfig, Encoder};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::motion::zoom::{MotionClip, fit_to_canvas};
use crate::style::config::RenderConfig;
use crate::timeline::allocator::{allocate, reflow};
use crate::timeline::segment::TimelineSegment;
use crate::transcript::words::Transcript;

/// Lifecycle of one render call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderState {
    /// Nothing done yet.
    #[default]
    Init,
    /// Timeline segments exist.
    SegmentsAllocated,
    /// Images decoded, resized and any drops reflowed.
    ImagesRendered,
    /// Caption overlays built and typeset.
    CaptionsBuilt,
    /// Every frame composited and handed to the encoder.
    Composited,
    /// Encoder finished; output complete.
    Encoded,
    /// A fatal error ended the render.
    Failed,
}

impl std::fmt::Display for RenderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RenderState::Init => "INIT",
            RenderState::SegmentsAllocated => "SEGMENTS_ALLOCATED",
            RenderState::ImagesRendered => "IMAGES_RENDERED",
            RenderState::CaptionsBuilt => "CAPTIONS_BUILT",
            RenderState::Composited => "COMPOSITED",
            RenderState::Encoded => "ENCODED",
            RenderState::Failed => "FAILED",
        })
    }
}

/// An image removed from the timeline because it failed to decode.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DroppedImage {
    /// Display index of the image.
    pub index: usize,
    /// Source path.
    pub path: PathBuf,
    /// Decode error text.
    pub error: String,
}

/// Outcome of a render call.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderReport {
    /// Last state reached.
    pub state: RenderState,
    /// Segments allocated before decoding.
    pub segments_planned: usize,
    /// Segments that made it into the output.
    pub segments_rendered: usize,
    /// Caption overlays built.
    pub overlays: usize,
    /// Frames handed to the encoder.
    pub frames: u64,
    /// Audio (and output) duration in seconds.
    pub audio_duration_secs: f64,
    /// Seconds covered by the visual track.
    pub visual_duration_secs: f64,
    /// Images dropped with a decode warning.
    pub dropped: Vec<DroppedImage>,
}

/// Runs the pipeline for one configuration and decoder.
///
/// Every call starts from [`RenderState::Init`]; the report of the most recent call stays
/// readable through [`RenderSession::report`], including after a failure.
pub struct RenderSession<'a> {
    config: RenderConfig,
    decoder: &'a dyn Decoder,
    report: RenderReport,
}

impl<'a> RenderSession<'a> {
    /// Validate `config` and create a session.
    pub fn new(config: RenderConfig, decoder: &'a dyn Decoder) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            decoder,
            report: RenderReport::default(),
        })
    }

    /// Report of the most recent call.
    pub fn report(&self) -> &RenderReport {
        &self.report
    }

    /// Configuration in use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Allocate the timeline and build overlays without decoding any image.
    pub fn plan(
        &mut self,
        bundle: &MediaBundle,
        transcript: &Transcript,
    ) -> ReelResult<RenderSpec> {
        self.reset();
        let out = self.plan_inner(bundle, transcript);
        self.settle(out)
    }

    /// Run every stage up to [`RenderState::CaptionsBuilt`] and return the drawable scene.
    pub fn prepare(&mut self, bundle: &MediaBundle, transcript: &Transcript) -> ReelResult<Scene> {
        self.reset();
        let out = self.prepare_inner(bundle, transcript);
        self.settle(out)
    }

    /// Render the composite at absolute time `t` (seconds) into a single frame.
    pub fn render_still(
        &mut self,
        bundle: &MediaBundle,
        transcript: &Transcript,
        t: f64,
    ) -> ReelResult<FrameRGBA> {
        self.reset();
        let out = self.prepare_inner(bundle, transcript).and_then(|scene| {
            let d = scene.spec().duration_secs();
            if !t.is_finite() || t < 0.0 || t >= d {
                return Err(ReelError::invalid_input(format!(
                    "time {t} is outside the output [0, {d})"
                )));
            }
            FrameCompositor::new().render_at(&scene, t)
        });
        self.settle(out)
    }

    /// Render the whole video into `encoder`.
    #[tracing::instrument(skip_all, fields(root = %bundle.root.display()))]
    pub fn render(
        &mut self,
        bundle: &MediaBundle,
        transcript: &Transcript,
        encoder: &mut dyn Encoder,
    ) -> ReelResult<&RenderReport> {
        self.reset();
        let out = self
            .prepare_inner(bundle, transcript)
            .and_then(|scene| self.encode_inner(&scene, encoder));
        self.settle(out)?;
        Ok(&self.report)
    }

    fn reset(&mut self) {
        self.report = RenderReport::default();
        tracing::info!(state = %RenderState::Init, "render state");
    }

    fn transition(&mut self, next: RenderState) {
        self.report.state = next;
        tracing::info!(state = %next, "render state");
    }

    fn settle<T>(&mut self, out: ReelResult<T>) -> ReelResult<T> {
        if let Err(e) = &out {
            tracing::error!(error = %e, from = %self.report.state, "render failed");
            self.transition(RenderState::Failed);
        }
        out
    }

    fn allocate_stage(
        &mut self,
        bundle: &MediaBundle,
    ) -> ReelResult<(AudioTrack, Vec<TimelineSegment>)> {
        let audio = self.decoder.load_audio(&bundle.audio_path)?;
        let segments = allocate(&bundle.images, audio.duration_secs)?;
        self.report.audio_duration_secs = audio.duration_secs;
        self.report.segments_planned = segments.len();
        self.transition(RenderState::SegmentsAllocated);
        Ok((audio, segments))
    }

    fn plan_inner(
        &mut self,
        bundle: &MediaBundle,
        transcript: &Transcript,
    ) -> ReelResult<RenderSpec> {
        let (audio, segments) = self.allocate_stage(bundle)?;
        let overlays = build_overlays(transcript.words(), Arc::new(self.config.caption.clone()));
        self.report.segments_rendered = segments.len();
        self.report.overlays = overlays.len();
        let spec = RenderSpec {
            segments,
            overlays,
            audio,
            canvas: self.config.canvas,
            fps: self.config.fps,
        };
        self.report.visual_duration_secs = spec.visual_duration_secs();
        self.report.frames = spec.frame_count();
        Ok(spec)
    }

    fn prepare_inner(&mut self, bundle: &MediaBundle, transcript: &Transcript) -> ReelResult<Scene> {
        let (audio, segments) = self.allocate_stage(bundle)?;

        let clips = self.render_images(&segments, audio.duration_secs)?;
        self.report.segments_rendered = clips.len();
        self.report.visual_duration_secs = clips.last().map_or(0.0, |c| c.segment.end);
        self.transition(RenderState::ImagesRendered);

        let overlays = build_overlays(transcript.words(), Arc::new(self.config.caption.clone()));
        let captions = CaptionSet::prepare(&overlays, self.config.canvas)?;
        self.report.overlays = overlays.len();
        self.transition(RenderState::CaptionsBuilt);

        let spec = RenderSpec {
            segments: clips.iter().map(|c| c.segment.clone()).collect(),
            overlays,
            audio,
            canvas: self.config.canvas,
            fps: self.config.fps,
        };
        Scene::new(
            spec,
            &clips,
            captions,
            self.config.motion,
            self.config.background,
        )
    }

    /// Decode and resize each segment's image; drop the ones that fail to decode and reflow.
    fn render_images(
        &mut self,
        segments: &[TimelineSegment],
        audio_duration: f64,
    ) -> ReelResult<Vec<MotionClip>> {
        let mut survivors = Vec::with_capacity(segments.len());
        let mut images = Vec::with_capacity(segments.len());
        for seg in segments {
            let decoded = self
                .decoder
                .decode_image(&seg.image)
                .and_then(|img| fit_to_canvas(&img, self.config.canvas));
            match decoded {
                Ok(img) => {
                    tracing::debug!(
                        index = seg.image.index,
                        start = seg.start,
                        duration = seg.duration(),
                        "segment image ready"
                    );
                    survivors.push(seg.clone());
                    images.push(img);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(
                        index = seg.image.index,
                        path = %seg.image.path.display(),
                        error = %e,
                        "dropping image that failed to decode"
                    );
                    self.report.dropped.push(DroppedImage {
                        index: seg.image.index,
                        path: seg.image.path.clone(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if survivors.is_empty() {
            return Err(ReelError::invalid_input(format!(
                "all {} images failed to decode",
                segments.len()
            )));
        }
        let reflowed = if survivors.len() == segments.len() {
            survivors
        } else {
            reflow(&survivors, audio_duration, self.config.drop_policy)?
        };

        Ok(reflowed
            .into_iter()
            .zip(images)
            .map(|(segment, image)| MotionClip { segment, image })
            .collect())
    }

    fn encode_inner(&mut self, scene: &Scene, encoder: &mut dyn Encoder) -> ReelResult<()> {
        let spec = scene.spec();
        encoder.begin(EncodeConfig {
            width: spec.canvas.width,
            height: spec.canvas.height,
            fps: spec.fps,
            audio: Some(AudioInput {
                path: spec.audio.path.clone(),
                duration_secs: spec.audio.duration_secs,
            }),
        })?;

        match self.stream_frames(scene, encoder) {
            Ok(frames) => {
                self.report.frames = frames;
                self.transition(RenderState::Composited);
            }
            Err(e) => {
                encoder.abort();
                return Err(e);
            }
        }

        if let Err(e) = encoder.end() {
            encoder.abort();
            return Err(e);
        }
        self.transition(RenderState::Encoded);
        Ok(())
    }

    fn stream_frames(&self, scene: &Scene, encoder: &mut dyn Encoder) -> ReelResult<u64> {
        let range = scene.spec().frame_range();
        let chunk_size = self.config.chunk_size.max(1) as u64;
        let pool = if self.config.parallel {
            Some(build_thread_pool(self.config.threads)?)
        } else {
            None
        };
        let mut compositor = FrameCompositor::new();

        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))?;
            let frames = match pool.as_ref() {
                Some(pool) => render_chunk_parallel(scene, chunk, pool)?,
                None => (chunk.start.0..chunk.end.0)
                    .map(|f| compositor.render_frame(scene, FrameIndex(f)))
                    .collect::<ReelResult<Vec<_>>>()?,
            };
            for (offset, frame) in frames.iter().enumerate() {
                encoder.push_frame(FrameIndex(chunk_start + offset as u64), frame)?;
            }
            tracing::debug!(start = chunk_start, end = chunk_end, "chunk encoded");
            chunk_start = chunk_end;
        }
        Ok(range.len_frames())
    }
}

/// Run a full render with a fresh session and return its report.
pub fn render_video(
    bundle: &MediaBundle,
    transcript: &Transcript,
    config: RenderConfig,
    decoder: &dyn Decoder,
    encoder: &mut dyn Encoder,
) -> ReelResult<RenderReport> {
    let mut session = RenderSession::new(config, decoder)?;
    session.render(bundle, transcript, encoder).cloned()
}

fn render_chunk_parallel(
    scene: &Scene,
    range: FrameRange,
    pool: &rayon::ThreadPool,
) -> ReelResult<Vec<FrameRGBA>> {
    let indices = (range.start.0..range.end.0).collect::<Vec<_>>();
    let rendered = pool.install(|| {
        indices
            .par_iter()
            .map_init(FrameCompositor::new, |compositor, &f| {
                compositor.render_frame(scene, FrameIndex(f))
            })
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::invalid_input(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/render.rs"]
mod tests;
