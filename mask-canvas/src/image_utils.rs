use emath::Vec2;
use image::{DynamicImage, RgbaImage, imageops::FilterType};
use tiny_skia::{ColorU8, Pixmap};

use crate::MaskCanvasError;

/// Size of an image scaled to fit `viewport` with its aspect ratio preserved.
///
/// The fitted side takes the viewport size, the other side is truncated, never below 1.
pub fn fit_size(viewport: (u32, u32), image: (u32, u32)) -> (u32, u32) {
    let (vw, vh) = (viewport.0 as u64, viewport.1 as u64);
    let (iw, ih) = (image.0 as u64, image.1 as u64);
    let (w, h) = if vw * ih <= vh * iw {
        let ratio = ih as f64 / iw as f64;
        (vw as f64, (vw as f64 * ratio).trunc())
    } else {
        let ratio = iw as f64 / ih as f64;
        ((vh as f64 * ratio).trunc(), vh as f64)
    };
    ((w as u32).max(1), (h as u32).max(1))
}

/// Top-left position that centers `size` inside `viewport`.
pub fn centered_offset(viewport: (u32, u32), size: (u32, u32)) -> Vec2 {
    Vec2::new(
        (viewport.0 as f32 - size.0 as f32) / 2.0,
        (viewport.1 as f32 - size.1 as f32) / 2.0,
    )
}

pub fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, MaskCanvasError> {
    Pixmap::new(width, height).ok_or(MaskCanvasError::PixmapAllocation { width, height })
}

/// Resize `image` (bilinear) and convert it into a premultiplied pixmap.
pub fn scaled_pixmap(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Pixmap, MaskCanvasError> {
    let rgba = image.to_rgba8();
    let resized = if rgba.dimensions() == (width, height) {
        rgba
    } else {
        image::imageops::resize(&rgba, width, height, FilterType::Triangle)
    };
    rgba_to_pixmap(&resized)
}

pub fn rgba_to_pixmap(image: &RgbaImage) -> Result<Pixmap, MaskCanvasError> {
    let mut pixmap = new_pixmap(image.width(), image.height())?;
    for (dst, image::Rgba([r, g, b, a])) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        *dst = ColorU8::from_rgba(*r, *g, *b, *a).premultiply();
    }
    Ok(pixmap)
}

/// Convert a premultiplied pixmap back into straight-alpha RGBA.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_wide_image() {
        assert_eq!(fit_size((100, 100), (200, 100)), (100, 50));
        assert_eq!(centered_offset((100, 100), (100, 50)), Vec2::new(0.0, 25.0));
    }

    #[test]
    fn fit_tall_image() {
        assert_eq!(fit_size((100, 100), (30, 90)), (33, 100));
    }

    #[test]
    fn fit_truncates_and_keeps_one_pixel() {
        assert_eq!(fit_size((100, 80), (300, 70)), (100, 23));
        assert_eq!(fit_size((100, 100), (5000, 1)), (100, 1));
    }

    #[test]
    fn pixmap_round_trip_keeps_opaque_pixels() {
        let image = RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8 * 40, y as u8 * 90, 7, 255]));
        let pixmap = rgba_to_pixmap(&image).unwrap();
        assert_eq!(pixmap_to_rgba(&pixmap), image);
    }

    #[test]
    fn zero_sized_pixmap_is_an_error() {
        assert!(matches!(
            new_pixmap(0, 10),
            Err(MaskCanvasError::PixmapAllocation {
                width: 0,
                height: 10
            })
        ));
    }
}
