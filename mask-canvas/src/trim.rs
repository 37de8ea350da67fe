use image::{RgbaImage, imageops::FilterType};
use itertools::{Itertools, MinMaxResult};
use log::debug;

/// How the width and height of the trimmed region are derived from its edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TrimMode {
    /// `right - left` and `bottom - top`. The last content column and row are cut off,
    /// matching exports produced by earlier versions of the widget.
    #[default]
    Compatible,
    /// `right - left + 1` and `bottom - top + 1`, the full bounding box.
    Inclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Crops a rendered composite to the pixels that are not fully transparent and
/// shrinks the result to a maximum export size.
#[derive(Debug, Clone)]
pub struct ImageTrimmer {
    pub max_side: u32,
    pub mode: TrimMode,
}

impl ImageTrimmer {
    pub fn new(max_side: u32, mode: TrimMode) -> Self {
        Self { max_side, mode }
    }

    /// Bounding box of all pixels with nonzero alpha, `None` if nothing is left.
    pub fn bounds(&self, image: &RgbaImage) -> Option<TrimRect> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let mut left = width;
        let mut right = 0;
        let mut top = None;
        let mut bottom = 0;
        for (y, row) in image.as_raw().chunks_exact(width as usize * 4).enumerate() {
            let (row_left, row_right) = match row
                .chunks_exact(4)
                .positions(|pixel| pixel[3] != 0)
                .minmax()
            {
                MinMaxResult::NoElements => continue,
                MinMaxResult::OneElement(x) => (x as u32, x as u32),
                MinMaxResult::MinMax(l, r) => (l as u32, r as u32),
            };
            left = left.min(row_left);
            right = right.max(row_right);
            if top.is_none() {
                top = Some(y as u32);
            }
            bottom = y as u32;
        }

        let top = top?;
        let extra = match self.mode {
            TrimMode::Compatible => 0,
            TrimMode::Inclusive => 1,
        };
        let rect_width = (right as i64 - left as i64) + extra;
        let rect_height = (bottom as i64 - top as i64) + extra;
        if rect_width <= 0 || rect_height <= 0 {
            return None;
        }
        Some(TrimRect {
            x: left,
            y: top,
            width: rect_width as u32,
            height: rect_height as u32,
        })
    }

    pub fn crop(&self, image: &RgbaImage) -> Option<RgbaImage> {
        let rect = self.bounds(image)?;
        debug!("Trim {:?} to {rect:?}", image.dimensions());
        Some(image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
    }

    /// Target size when `size` is wider than `max_side`, keeping the aspect ratio.
    pub fn downsampled_size(&self, (width, height): (u32, u32)) -> Option<(u32, u32)> {
        if width <= self.max_side || self.max_side == 0 {
            return None;
        }
        let max = self.max_side as f64;
        let (w, h) = if width > height {
            (max, (max * height as f64 / width as f64).trunc())
        } else {
            ((max * width as f64 / height as f64).trunc(), max)
        };
        Some(((w as u32).max(1), (h as u32).max(1)))
    }

    pub fn downsample(&self, image: RgbaImage) -> RgbaImage {
        match self.downsampled_size(image.dimensions()) {
            Some((width, height)) => {
                debug!("Downsample {:?} to {width}x{height}", image.dimensions());
                image::imageops::resize(&image, width, height, FilterType::CatmullRom)
            }
            None => image,
        }
    }

    /// Crop and downsample. `None` when the image has no visible content.
    pub fn trim(&self, image: &RgbaImage) -> Option<RgbaImage> {
        self.crop(image).map(|cropped| self.downsample(cropped))
    }
}
