use emath::Vec2;
use image::{DynamicImage, RgbaImage};
use log::{debug, info};
use tiny_skia::{
    BlendMode, Color, FillRule, FilterQuality, LineCap, LineJoin, PathBuilder, Pixmap,
    PixmapPaint, Stroke,
};

use crate::{
    BrushConfig, MaskCanvasError, StrokePath, Transform,
    image_utils::{centered_offset, fit_size, new_pixmap, pixmap_to_rgba, scaled_pixmap},
};

/// Stroke that has not been committed yet, drawn on top of the mask for feedback.
#[derive(Debug, Clone, Copy)]
pub struct LiveStroke<'a> {
    pub path: &'a StrokePath,
    pub brush: BrushConfig,
    pub width: f32,
}

/// Owns the fitted source photo and the viewport-sized mask layer.
///
/// The composite punches the mask out of the photo with destination-out, so masked
/// regions render fully transparent.
pub struct MaskCompositor {
    source: Pixmap,
    source_offset: Vec2,
    mask: Pixmap,
    // Reused between frames.
    frame: Pixmap,
    scratch: Pixmap,
}

impl MaskCompositor {
    pub fn load(
        viewport: (u32, u32),
        source: &DynamicImage,
        initial_mask: Option<&DynamicImage>,
    ) -> Result<Self, MaskCanvasError> {
        let (width, height) = viewport;
        if width == 0 || height == 0 {
            return Err(MaskCanvasError::EmptyViewport { width, height });
        }
        if source.width() == 0 || source.height() == 0 {
            return Err(MaskCanvasError::InvalidSource {
                width: source.width(),
                height: source.height(),
            });
        }

        let fitted = fit_size(viewport, (source.width(), source.height()));
        let source_offset = centered_offset(viewport, fitted);
        let source_pixmap = scaled_pixmap(source, fitted.0, fitted.1)?;

        let mut mask = new_pixmap(width, height)?;
        if let Some(initial_mask) = initial_mask {
            let scaled = scaled_pixmap(initial_mask, fitted.0, fitted.1)?;
            mask.draw_pixmap(
                0,
                0,
                scaled.as_ref(),
                &PixmapPaint::default(),
                tiny_skia::Transform::from_translate(source_offset.x, source_offset.y),
                None,
            );
        }

        info!(
            "Loaded source {}x{} as {}x{} at {:?}, initial mask: {}",
            source.width(),
            source.height(),
            fitted.0,
            fitted.1,
            source_offset,
            initial_mask.is_some()
        );

        Ok(Self {
            source: source_pixmap,
            source_offset,
            mask,
            frame: new_pixmap(width, height)?,
            scratch: new_pixmap(width, height)?,
        })
    }

    /// Size of the fitted source layer.
    pub fn source_size(&self) -> (u32, u32) {
        (self.source.width(), self.source.height())
    }

    pub fn source_offset(&self) -> Vec2 {
        self.source_offset
    }

    pub fn mask(&self) -> &Pixmap {
        &self.mask
    }

    /// Current mask layer as straight-alpha RGBA.
    pub fn mask_image(&self) -> RgbaImage {
        pixmap_to_rgba(&self.mask)
    }

    /// The part of the mask layer that lies over the source photo.
    pub fn mask_over_source(&self) -> RgbaImage {
        let mask = self.mask_image();
        let x = self.source_offset.x.max(0.0) as u32;
        let y = self.source_offset.y.max(0.0) as u32;
        let (w, h) = self.source_size();
        image::imageops::crop_imm(&mask, x, y, w, h).to_image()
    }

    pub fn commit_stroke(&mut self, stroke: LiveStroke<'_>) {
        debug!(
            "Commit stroke with {} segments, width {}, blend {:?}",
            stroke.path.segments().len(),
            stroke.width,
            stroke.brush.blend_mode
        );
        rasterize_stroke(&mut self.mask, stroke);
    }

    /// Render source, mask and the optional live stroke for the given transform.
    pub fn render_composite(
        &mut self,
        transform: Transform,
        live: Option<LiveStroke<'_>>,
    ) -> &Pixmap {
        self.frame.fill(Color::TRANSPARENT);

        let quality = if transform.scale == 1.0 {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bilinear
        };
        let canvas_transform = transform.to_skia();

        self.frame.draw_pixmap(
            0,
            0,
            self.source.as_ref(),
            &PixmapPaint {
                quality,
                ..Default::default()
            },
            canvas_transform.pre_translate(self.source_offset.x, self.source_offset.y),
            None,
        );

        let mask = match live {
            Some(stroke) => {
                self.scratch.data_mut().copy_from_slice(self.mask.data());
                rasterize_stroke(&mut self.scratch, stroke);
                &self.scratch
            }
            None => &self.mask,
        };
        self.frame.draw_pixmap(
            0,
            0,
            mask.as_ref(),
            &PixmapPaint {
                blend_mode: BlendMode::DestinationOut,
                quality,
                ..Default::default()
            },
            canvas_transform,
            None,
        );

        &self.frame
    }
}

fn rasterize_stroke(target: &mut Pixmap, stroke: LiveStroke<'_>) {
    let paint = stroke.brush.paint();
    let identity = tiny_skia::Transform::identity();

    if stroke.path.is_dot() {
        let center = stroke.path.start();
        if let Some(disc) = PathBuilder::from_circle(center.x, center.y, stroke.width / 2.0) {
            target.fill_path(&disc, &paint, FillRule::Winding, identity, None);
        }
    } else if let Some(path) = stroke.path.to_skia_path() {
        let skia_stroke = Stroke {
            width: stroke.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        target.stroke_path(&path, &paint, &skia_stroke, identity, None);
    }
}
