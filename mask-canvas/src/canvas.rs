use emath::{Pos2, Vec2};
use image::{DynamicImage, RgbaImage};
use log::{debug, info, warn};
use tiny_skia::Pixmap;

use crate::{
    BrushConfig, CanvasSettings, CoordinateTransform, DirectionGate, ImageTrimmer, LiveStroke,
    MaskCompositor, StrokeBuilder, ToolMode, Transform, TrimMode, image_utils::pixmap_to_rgba,
};

pub const MIN_STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum MaskCanvasError {
    #[error("No image loaded yet")]
    NotReady,
    #[error("Viewport has no area: {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("Cannot allocate a {width}x{height} raster")]
    PixmapAllocation { width: u32, height: u32 },
    #[error("Source image has no pixels: {width}x{height}")]
    InvalidSource { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A decoded pointer sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Pos2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Pos2::new(x, y),
        }
    }
}

/// Output of a pinch recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    ScaleBegin,
    Scale { factor: f32 },
    ScaleEnd,
}

#[allow(clippy::large_enum_variant)]
enum CanvasState {
    Unprepared,
    Prepared(Prepared),
}

struct Prepared {
    // Kept at full resolution to re-fit after a viewport change.
    original: DynamicImage,
    compositor: MaskCompositor,
}

/// Interactive masking canvas.
///
/// Pointer events paint into the mask (`Mask`/`Recover`) or pan the zoomed view (`Pan`).
/// Everything except configuration answers [`MaskCanvasError::NotReady`] until an image
/// pair has been loaded.
pub struct MaskCanvas {
    viewport: (u32, u32),
    settings: CanvasSettings,
    tool_mode: ToolMode,
    brush: Option<BrushConfig>,
    state: CanvasState,
    transform: CoordinateTransform,
    gate: DirectionGate,
    stroke: StrokeBuilder,
    last_pan_point: Option<Pos2>,
    scaling: bool,
}

impl MaskCanvas {
    pub fn new(viewport: (u32, u32), settings: CanvasSettings) -> Self {
        let tool_mode = ToolMode::default();
        Self {
            viewport,
            settings,
            tool_mode,
            brush: tool_mode.brush(),
            state: CanvasState::Unprepared,
            transform: CoordinateTransform::new(viewport_vec(viewport)),
            gate: DirectionGate::default(),
            stroke: StrokeBuilder::default(),
            last_pan_point: None,
            scaling: false,
        }
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self.state, CanvasState::Prepared(_))
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    pub fn transform(&self) -> Transform {
        self.transform.transform()
    }

    pub fn is_scaling(&self) -> bool {
        self.scaling
    }

    /// Replace the image pair. The transform goes back to identity.
    pub fn load(
        &mut self,
        source: DynamicImage,
        initial_mask: Option<&DynamicImage>,
    ) -> Result<(), MaskCanvasError> {
        let compositor = MaskCompositor::load(self.viewport, &source, initial_mask)?;
        self.state = CanvasState::Prepared(Prepared {
            original: source,
            compositor,
        });
        self.transform.reset();
        self.reset_interaction();
        Ok(())
    }

    /// Adapt to a new viewport size, re-fitting the loaded image and its current mask.
    pub fn resize_viewport(&mut self, width: u32, height: u32) -> Result<(), MaskCanvasError> {
        if width == 0 || height == 0 {
            warn!("Ignoring resize to {width}x{height}");
            return Err(MaskCanvasError::EmptyViewport { width, height });
        }
        if self.viewport == (width, height) {
            return Ok(());
        }
        debug!("Resize viewport {:?} -> {width}x{height}", self.viewport);
        let reloaded = match &mut self.state {
            CanvasState::Prepared(prepared) => {
                let mask = DynamicImage::ImageRgba8(prepared.compositor.mask_over_source());
                prepared.compositor =
                    MaskCompositor::load((width, height), &prepared.original, Some(&mask))?;
                true
            }
            CanvasState::Unprepared => false,
        };
        self.viewport = (width, height);
        self.transform.set_viewport(viewport_vec(self.viewport));
        if reloaded {
            self.transform.reset();
            self.reset_interaction();
        }
        Ok(())
    }

    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        debug!("Tool mode {:?} -> {mode:?}", self.tool_mode);
        if self.stroke.is_active() {
            debug!("Discarding stroke in progress");
        }
        self.tool_mode = mode;
        self.brush = mode.brush();
        self.reset_interaction();
    }

    pub fn set_stroke_width(&mut self, stroke_width: f32) {
        self.settings.stroke_width = if stroke_width.is_finite() {
            stroke_width.max(MIN_STROKE_WIDTH)
        } else {
            warn!("Ignoring stroke width {stroke_width}");
            self.settings.stroke_width
        };
    }

    pub fn set_max_export_side(&mut self, max_export_side: u32) {
        self.settings.max_export_side = max_export_side.max(1);
    }

    pub fn set_trim_mode(&mut self, trim_mode: TrimMode) {
        self.settings.trim_mode = trim_mode;
    }

    /// Stroke width in canvas units, so strokes keep their screen thickness when zoomed.
    pub fn brush_width(&self) -> f32 {
        self.settings.stroke_width / self.transform.scale()
    }

    pub fn set_scale(&mut self, scale: f32) -> Result<Transform, MaskCanvasError> {
        self.ensure_prepared()?;
        Ok(self.transform.set_scale(scale))
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<(), MaskCanvasError> {
        self.ensure_prepared()?;
        if self.scaling {
            // A pinch owns the pointer until it is lifted.
            self.scaling = event.kind != PointerKind::Up;
            return Ok(());
        }
        match self.tool_mode {
            ToolMode::Pan => self.handle_pan(event),
            ToolMode::Mask | ToolMode::Recover => self.handle_paint(event),
        }
        Ok(())
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) -> Result<(), MaskCanvasError> {
        self.ensure_prepared()?;
        if self.tool_mode != ToolMode::Pan {
            return Ok(());
        }
        match event {
            GestureEvent::ScaleBegin => self.scaling = true,
            GestureEvent::Scale { factor } => {
                self.transform.apply_scale_factor(factor);
            }
            GestureEvent::ScaleEnd => {}
        }
        Ok(())
    }

    /// Draw the current frame: photo, mask holes and the stroke in progress.
    pub fn render_composite(&mut self) -> Result<&Pixmap, MaskCanvasError> {
        let CanvasState::Prepared(prepared) = &mut self.state else {
            return Err(MaskCanvasError::NotReady);
        };
        let width = self.settings.stroke_width / self.transform.scale();
        let live = self
            .stroke
            .live_path()
            .zip(self.brush)
            .map(|(path, brush)| LiveStroke { path, brush, width });
        Ok(prepared
            .compositor
            .render_composite(self.transform.transform(), live))
    }

    /// Render unzoomed, crop to the visible content and downsample to the export size.
    ///
    /// `Ok(None)` means everything was masked away.
    pub fn create_masked_image(&mut self) -> Result<Option<RgbaImage>, MaskCanvasError> {
        self.ensure_prepared()?;
        // A stroke or pan in progress belongs to the old transform.
        self.transform.reset();
        self.reset_interaction();
        let CanvasState::Prepared(prepared) = &mut self.state else {
            return Err(MaskCanvasError::NotReady);
        };
        let frame = prepared.compositor.render_composite(Transform::IDENTITY, None);
        let composite = pixmap_to_rgba(frame);

        let trimmer = ImageTrimmer::new(self.settings.max_export_side, self.settings.trim_mode);
        let exported = trimmer.trim(&composite);
        match &exported {
            Some(image) => info!("Exported {}x{} image", image.width(), image.height()),
            None => info!("Export has no visible content"),
        }
        Ok(exported)
    }

    pub fn mask_image(&self) -> Result<RgbaImage, MaskCanvasError> {
        match &self.state {
            CanvasState::Prepared(prepared) => Ok(prepared.compositor.mask_image()),
            CanvasState::Unprepared => Err(MaskCanvasError::NotReady),
        }
    }

    fn ensure_prepared(&self) -> Result<(), MaskCanvasError> {
        if self.is_prepared() {
            Ok(())
        } else {
            Err(MaskCanvasError::NotReady)
        }
    }

    fn reset_interaction(&mut self) {
        self.scaling = false;
        self.gate.reset();
        self.stroke.cancel();
        self.last_pan_point = None;
    }

    fn handle_pan(&mut self, event: PointerEvent) {
        match event.kind {
            PointerKind::Down => {
                self.gate.reset();
                self.last_pan_point = Some(event.position);
            }
            PointerKind::Move => {
                if let Some(last) = self.last_pan_point {
                    let delta = self.gate.gate(last, event.position);
                    if delta != Vec2::ZERO {
                        let transform = self.transform.apply_pan(delta);
                        debug!(
                            "Pan {:?} to {:?}",
                            self.gate.confirmed(),
                            transform.translation
                        );
                    }
                    self.last_pan_point = Some(event.position);
                }
            }
            PointerKind::Up | PointerKind::Cancel => self.last_pan_point = None,
        }
    }

    fn handle_paint(&mut self, event: PointerEvent) {
        let point = self.transform.to_canvas_space(event.position);
        match event.kind {
            PointerKind::Down => self.stroke.begin(point),
            PointerKind::Move => {
                self.stroke.extend(point);
            }
            PointerKind::Up => {
                let width = self.brush_width();
                if let (Some(path), Some(brush), CanvasState::Prepared(prepared)) =
                    (self.stroke.end(point), self.brush, &mut self.state)
                {
                    prepared.compositor.commit_stroke(LiveStroke {
                        path: &path,
                        brush,
                        width,
                    });
                }
            }
            PointerKind::Cancel => self.stroke.cancel(),
        }
    }
}

fn viewport_vec((width, height): (u32, u32)) -> Vec2 {
    Vec2::new(width as f32, height as f32)
}
