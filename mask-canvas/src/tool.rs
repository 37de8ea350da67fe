use tiny_skia::{BlendMode, Color, Paint};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ToolMode {
    #[default]
    Mask,
    Recover,
    Pan,
}

impl ToolMode {
    pub const ALL: [ToolMode; 3] = [ToolMode::Mask, ToolMode::Recover, ToolMode::Pan];

    pub fn is_paint(self) -> bool {
        self.brush().is_some()
    }

    pub fn brush(self) -> Option<BrushConfig> {
        BRUSHES
            .iter()
            .find(|(mode, _)| *mode == self)
            .map(|(_, brush)| *brush)
    }
}

/// How a paint tool writes into the mask layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushConfig {
    pub color: Color,
    pub blend_mode: BlendMode,
}

impl BrushConfig {
    pub fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.color);
        paint.blend_mode = self.blend_mode;
        paint.anti_alias = true;
        paint
    }
}

// Mask adds opaque coverage, Recover clears whatever is under the stroke.
const BRUSHES: [(ToolMode, BrushConfig); 2] = [
    (
        ToolMode::Mask,
        BrushConfig {
            color: Color::WHITE,
            blend_mode: BlendMode::SourceOver,
        },
    ),
    (
        ToolMode::Recover,
        BrushConfig {
            color: Color::TRANSPARENT,
            blend_mode: BlendMode::Clear,
        },
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_has_no_brush() {
        assert_eq!(ToolMode::Pan.brush(), None);
        assert!(!ToolMode::Pan.is_paint());
    }

    #[test]
    fn recover_clears() {
        let brush = ToolMode::Recover.brush().unwrap();
        assert_eq!(brush.blend_mode, BlendMode::Clear);
        assert_eq!(brush.color.alpha(), 0.0);
    }

    #[test]
    fn mask_paints_opaque() {
        let paint = ToolMode::Mask.brush().unwrap().paint();
        assert_eq!(paint.blend_mode, BlendMode::SourceOver);
        assert!(paint.anti_alias);
    }
}
