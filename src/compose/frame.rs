use std::path::Path;
use std::sync::Arc;

use crate::caption::overlay::visible_at;
use crate::caption::text::CaptionSet;
use crate::compose::spec::RenderSpec;
use crate::foundation::core::{Affine, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::motion::zoom::{MotionClip, ZoomMotion};
use crate::style::color::ColorDef;
use crate::timeline::segment::segment_index_at;

/// A rendered frame as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**; encoders flatten them over a background.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Premultiplied RGBA of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Write the frame as a straight-alpha PNG.
    pub fn save_png(&self, path: &Path) -> ReelResult<()> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        let img = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| ReelError::encode("frame buffer does not match its dimensions"))?;
        img.save(path)
            .map_err(|e| ReelError::encode(format!("write png '{}': {e}", path.display())))
    }
}

/// Everything a frame needs, prepared once per render and shared read-only across workers.
pub struct Scene {
    spec: RenderSpec,
    paints: Vec<vello_cpu::Image>,
    captions: CaptionSet,
    motion: ZoomMotion,
    background: [u8; 4],
    width: u16,
    height: u16,
}

impl Scene {
    /// Assemble a scene. `clips` must be index-aligned with `spec.segments` and `captions` with
    /// `spec.overlays`; every clip image must already be canvas-sized.
    pub fn new(
        spec: RenderSpec,
        clips: &[MotionClip],
        captions: CaptionSet,
        motion: ZoomMotion,
        background: ColorDef,
    ) -> ReelResult<Self> {
        let width: u16 = spec
            .canvas
            .width
            .try_into()
            .map_err(|_| ReelError::invalid_input("canvas width exceeds u16"))?;
        let height: u16 = spec
            .canvas
            .height
            .try_into()
            .map_err(|_| ReelError::invalid_input("canvas height exceeds u16"))?;
        if clips.len() != spec.segments.len() {
            return Err(ReelError::invalid_input(format!(
                "scene has {} clips for {} segments",
                clips.len(),
                spec.segments.len()
            )));
        }
        if captions.len() != spec.overlays.len() {
            return Err(ReelError::invalid_input(format!(
                "scene has {} typeset captions for {} overlays",
                captions.len(),
                spec.overlays.len()
            )));
        }

        let mut paints = Vec::with_capacity(clips.len());
        for clip in clips {
            if clip.image.width != spec.canvas.width || clip.image.height != spec.canvas.height {
                return Err(ReelError::invalid_input(format!(
                    "clip for image {} is {}x{}, expected canvas size {}x{}",
                    clip.segment.image.index,
                    clip.image.width,
                    clip.image.height,
                    spec.canvas.width,
                    spec.canvas.height
                )));
            }
            let pixmap = pixmap_from_premul_bytes(
                &clip.image.rgba8_premul,
                clip.image.width,
                clip.image.height,
            )?;
            paints.push(vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            });
        }

        Ok(Self {
            spec,
            paints,
            captions,
            motion,
            background: background.to_rgba8(),
            width,
            height,
        })
    }

    /// The render description this scene draws.
    pub fn spec(&self) -> &RenderSpec {
        &self.spec
    }
}

/// Rasterizes frames of a [`Scene`]. Holds a reusable `vello_cpu` context, so use one per thread.
#[derive(Default)]
pub struct FrameCompositor {
    ctx: Option<vello_cpu::RenderContext>,
}

impl FrameCompositor {
    /// Create a compositor with no cached context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render output frame `f`.
    pub fn render_frame(&mut self, scene: &Scene, f: FrameIndex) -> ReelResult<FrameRGBA> {
        self.render_at(scene, scene.spec.frame_time(f))
    }

    /// Render the composite at absolute time `t`: background, active segment, visible captions.
    pub fn render_at(&mut self, scene: &Scene, t: f64) -> ReelResult<FrameRGBA> {
        let (w, h) = (scene.width, scene.height);
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let full = vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
        let [r, g, b, a] = scene.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&full);

        if let Some(i) = segment_index_at(&scene.spec.segments, t)
            && let Some(paint) = scene.paints.get(i)
        {
            let seg = &scene.spec.segments[i];
            let tr = scene
                .motion
                .transform(scene.spec.canvas, seg.local_time(t).max(0.0));
            ctx.set_transform(affine_to_cpu(tr));
            ctx.set_paint(paint.clone());
            ctx.fill_rect(&full);
        }

        for i in visible_at(&scene.spec.overlays, t) {
            scene.captions.draw(&mut ctx, i);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ReelError::invalid_input("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ReelError::invalid_input("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ReelError::invalid_input("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
