use std::collections::HashMap;
use std::sync::Arc;

use crate::caption::fonts::{FontFile, FontLibrary};
use crate::caption::overlay::CaptionOverlay;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout (straight alpha).
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    fn to_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Parley contexts bound to a single registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
}

impl TextLayoutEngine {
    /// Register `font` and remember its family name for every later layout.
    ///
    /// A collection registers several families; the one named by `font.family` wins when present.
    pub(crate) fn new(font: &FontFile) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.clone()), None);
        let names = families
            .iter()
            .filter_map(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_owned))
            .collect::<Vec<_>>();
        let family = font
            .family
            .as_ref()
            .and_then(|wanted| names.iter().find(|n| n.eq_ignore_ascii_case(wanted)))
            .or_else(|| names.first())
            .cloned()
            .ok_or_else(|| ReelError::invalid_input("font file contains no usable face"))?;

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    /// Shape `text`, wrap it at `max_width_px` and center each line within the block.
    pub(crate) fn layout_centered(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: f32,
    ) -> ReelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::invalid_input(
                "caption font size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        // `None` aligns against the widest line, so the block is exactly as wide as its text.
        layout.align(
            None,
            parley::Alignment::Center,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

/// A caption typeset and positioned on the canvas.
#[derive(Clone)]
pub struct PlacedCaption {
    layout: Arc<parley::Layout<TextBrushRgba8>>,
    font: usize,
    stroke_width: f32,
    stroke: TextBrushRgba8,
    /// Top-left corner of the text block in canvas pixels.
    pub origin: Point,
    /// Block width in pixels.
    pub width: f64,
    /// Block height in pixels.
    pub height: f64,
}

impl PlacedCaption {
    /// Number of laid-out lines.
    pub fn line_count(&self) -> usize {
        self.layout.lines().count()
    }
}

impl std::fmt::Debug for PlacedCaption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedCaption")
            .field("origin", &self.origin)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("lines", &self.line_count())
            .finish()
    }
}

/// Every overlay of a render, typeset up front and index-aligned with the overlay list.
///
/// Overlays whose text is blank after trimming have no placement and draw nothing.
#[derive(Clone, Default)]
pub struct CaptionSet {
    fonts: Vec<vello_cpu::peniko::FontData>,
    placed: Vec<Option<PlacedCaption>>,
}

impl CaptionSet {
    /// Typeset `overlays` for `canvas`.
    ///
    /// Fonts are resolved only when there is at least one non-blank overlay; each distinct `font`
    /// setting (file path or family name) is loaded once.
    #[tracing::instrument(skip_all, fields(overlays = overlays.len()))]
    pub fn prepare(overlays: &[CaptionOverlay], canvas: Canvas) -> ReelResult<Self> {
        let mut fonts = Vec::new();
        let mut engines: Vec<TextLayoutEngine> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut library = FontLibrary::new();
        let mut placed = Vec::with_capacity(overlays.len());

        for overlay in overlays {
            let style = overlay.style.as_ref();
            let text = overlay.text.trim();
            if text.is_empty() {
                placed.push(None);
                continue;
            }

            let font = match by_name.get(&style.font) {
                Some(&i) => i,
                None => {
                    let file = library.resolve(&style.font)?;
                    engines.push(TextLayoutEngine::new(&file)?);
                    fonts.push(vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(file.bytes),
                        file.index,
                    ));
                    let i = engines.len() - 1;
                    by_name.insert(style.font.clone(), i);
                    tracing::debug!(font = %style.font, "loaded caption font");
                    i
                }
            };

            let max_width = (f64::from(canvas.width) * style.max_width_ratio) as f32;
            let layout = engines[font].layout_centered(
                text,
                style.font_size,
                TextBrushRgba8::from_array(style.font_color.to_rgba8()),
                max_width,
            )?;
            let width = f64::from(layout.width());
            let height = f64::from(layout.height());
            let origin = Point::new(
                style.position_x.resolve(f64::from(canvas.width), width),
                style.position_y.resolve(f64::from(canvas.height), height),
            );

            placed.push(Some(PlacedCaption {
                layout: Arc::new(layout),
                font,
                stroke_width: style.stroke_width,
                stroke: TextBrushRgba8::from_array(style.stroke_color.to_rgba8()),
                origin,
                width,
                height,
            }));
        }

        Ok(Self { fonts, placed })
    }

    /// Number of overlays covered, including blank ones.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Return `true` when there are no overlays.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Placement for overlay `index`, if it draws anything.
    pub fn get(&self, index: usize) -> Option<&PlacedCaption> {
        self.placed.get(index).and_then(Option::as_ref)
    }

    /// Draw overlay `index` onto `ctx`: outline first, fill on top.
    pub(crate) fn draw(&self, ctx: &mut vello_cpu::RenderContext, index: usize) {
        let Some(p) = self.get(index) else {
            return;
        };
        let Some(font) = self.fonts.get(p.font) else {
            return;
        };

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((p.origin.x, p.origin.y)));
        if p.stroke_width > 0.0 {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(p.stroke_width)));
            ctx.set_paint(p.stroke.to_color());
            for line in p.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    ctx.glyph_run(font)
                        .font_size(run.run().font_size())
                        .stroke_glyphs(run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        }));
                }
            }
        }

        for line in p.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                ctx.set_paint(run.style().brush.to_color());
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    }));
            }
        }
    }
}

impl std::fmt::Debug for CaptionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionSet")
            .field("fonts", &self.fonts.len())
            .field("placed", &self.placed)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/text.rs"]
mod tests;
