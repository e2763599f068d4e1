use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::segment::TimelineSegment;

/// Sinusoidal zoom `scale(t) = base + amplitude * sin(t / period)` over segment-local time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomMotion {
    /// Scale at local time 0.
    pub base: f64,
    /// Peak deviation from `base`.
    pub amplitude: f64,
    /// Divisor applied to local time; the motion repeats every `2π * period` seconds.
    pub period: f64,
}

impl Default for ZoomMotion {
    fn default() -> Self {
        Self {
            base: 1.3,
            amplitude: 0.3,
            period: 3.0,
        }
    }
}

impl ZoomMotion {
    /// Validate that the motion never collapses or inverts the image.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.base.is_finite() || !self.amplitude.is_finite() || !self.period.is_finite() {
            return Err(ReelError::invalid_input("zoom parameters must be finite"));
        }
        if self.period <= 0.0 {
            return Err(ReelError::invalid_input("zoom period must be > 0"));
        }
        if self.base - self.amplitude.abs() <= 0.0 {
            return Err(ReelError::invalid_input(
                "zoom base must exceed |amplitude| so the scale stays positive",
            ));
        }
        Ok(())
    }

    /// Scale factor at segment-local time `t` (seconds).
    pub fn scale(&self, t: f64) -> f64 {
        self.base + self.amplitude * (t / self.period).sin()
    }

    /// Length of one full zoom cycle in seconds.
    pub fn cycle_secs(&self) -> f64 {
        std::f64::consts::TAU * self.period
    }

    /// Transform mapping a canvas-sized image to the canvas, zoomed about the center.
    pub fn transform(&self, canvas: Canvas, t: f64) -> Affine {
        let c = canvas.center().to_vec2();
        Affine::translate(c) * Affine::scale(self.scale(t)) * Affine::translate(-c)
    }
}

/// One segment after the Motion Renderer: its timeline slot plus the image, already resized to the
/// canvas.
#[derive(Clone, Debug)]
pub struct MotionClip {
    /// Timeline slot.
    pub segment: TimelineSegment,
    /// Image at canvas resolution.
    pub image: PreparedImage,
}

/// Resize `image` to exactly `canvas` (aspect ratio is not preserved).
pub fn fit_to_canvas(image: &PreparedImage, canvas: Canvas) -> ReelResult<PreparedImage> {
    if image.width == canvas.width && image.height == canvas.height {
        return Ok(image.clone());
    }
    let src = image::RgbaImage::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.as_ref().clone(),
    )
    .ok_or_else(|| ReelError::decode("image buffer does not match its dimensions"))?;
    // Premultiplied input keeps the filter from bleeding color out of transparent pixels.
    let resized = image::imageops::resize(
        &src,
        canvas.width,
        canvas.height,
        image::imageops::FilterType::Triangle,
    );
    PreparedImage::from_premul(canvas.width, canvas.height, resized.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/motion/zoom.rs"]
mod tests;
