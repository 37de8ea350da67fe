use emath::{Pos2, Vec2};
use log::{debug, warn};

pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 5.0;

/// Zoom and pan state of the canvas.
///
/// A screen point `p` maps to canvas space as `(p - translation) / scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub translation: Vec2,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: MIN_SCALE,
        translation: Vec2::ZERO,
    };

    pub fn to_skia(self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(
            self.scale,
            0.0,
            0.0,
            self.scale,
            self.translation.x,
            self.translation.y,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Owns the [`Transform`] for a viewport and keeps it inside the pan bounds.
///
/// Translation never goes positive and never goes past `-(scale - 1) * viewport`,
/// so the zoomed image always covers the viewport.
#[derive(Debug, Clone)]
pub struct CoordinateTransform {
    viewport: Vec2,
    transform: Transform,
}

impl CoordinateTransform {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            transform: Transform::IDENTITY,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn translation(&self) -> Vec2 {
        self.transform.translation
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    /// Change the viewport size and pull the translation back into the new bounds.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.transform.translation = self.clamp_translation(self.transform.translation);
    }

    /// Translation that keeps the zoomed image centered.
    pub fn default_translation(&self) -> Vec2 {
        default_translation(self.transform.scale, self.viewport)
    }

    /// Most negative translation allowed at the current scale.
    pub fn max_translation(&self) -> Vec2 {
        max_translation(self.transform.scale, self.viewport)
    }

    /// Set a new scale while keeping the current offset from the centered position,
    /// scaled by the zoom ratio.
    pub fn set_scale(&mut self, new_scale: f32) -> Transform {
        if new_scale.is_nan() {
            warn!("Ignoring NaN scale");
            return self.transform;
        }
        let old_scale = self.transform.scale;
        let offset = (self.transform.translation - self.default_translation()) / old_scale;

        let new_scale = new_scale.clamp(MIN_SCALE, MAX_SCALE);
        self.transform.scale = new_scale;
        let candidate = self.default_translation() + offset * new_scale;
        self.transform.translation = self.clamp_translation(candidate);

        debug!(
            "Scale {old_scale} -> {new_scale}, translation: {:?}",
            self.transform.translation
        );
        self.transform
    }

    /// Multiply the current scale by a pinch gesture factor.
    pub fn apply_scale_factor(&mut self, factor: f32) -> Transform {
        if factor.is_nan() {
            warn!("Ignoring NaN scale factor");
            return self.transform;
        }
        self.set_scale((self.transform.scale * factor).max(MIN_SCALE))
    }

    pub fn apply_pan(&mut self, delta: Vec2) -> Transform {
        self.transform.translation = self.clamp_translation(self.transform.translation + delta);
        self.transform
    }

    pub fn to_canvas_space(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.transform.translation) / self.transform.scale).to_pos2()
    }

    pub fn to_screen_space(&self, canvas: Pos2) -> Pos2 {
        (canvas.to_vec2() * self.transform.scale + self.transform.translation).to_pos2()
    }

    fn clamp_translation(&self, candidate: Vec2) -> Vec2 {
        let max = self.max_translation();
        Vec2::new(
            clamp_axis(candidate.x, max.x),
            clamp_axis(candidate.y, max.y),
        )
    }
}

fn default_translation(scale: f32, viewport: Vec2) -> Vec2 {
    -((scale - 1.0) * viewport) / 2.0
}

fn max_translation(scale: f32, viewport: Vec2) -> Vec2 {
    -((scale - 1.0) * viewport)
}

fn clamp_axis(candidate: f32, max: f32) -> f32 {
    if candidate < 0.0 {
        max.max(candidate)
    } else {
        candidate.min(0.0)
    }
}
