use crate::TrimMode;

pub const DEFAULT_STROKE_WIDTH: f32 = 20.0;
pub const DEFAULT_MAX_EXPORT_SIDE: u32 = 1024;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[non_exhaustive]
#[serde(default)]
pub struct CanvasSettings {
    /// Brush diameter in screen pixels, independent of the zoom level.
    pub stroke_width: f32,
    /// Exports wider than this are scaled down.
    pub max_export_side: u32,
    pub trim_mode: TrimMode,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            max_export_side: DEFAULT_MAX_EXPORT_SIDE,
            trim_mode: TrimMode::default(),
        }
    }
}

impl CanvasSettings {
    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_max_export_side(mut self, max_export_side: u32) -> Self {
        self.max_export_side = max_export_side;
        self
    }

    pub fn with_trim_mode(mut self, trim_mode: TrimMode) -> Self {
        self.trim_mode = trim_mode;
        self
    }
}
