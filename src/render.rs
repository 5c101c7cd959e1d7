//! Render pipeline
//!
//! Turns the current text and settings into a raster surface. Matrix
//! generation is left entirely to the `qrcode` engine; this module only
//! lays out the quiet zone and paints pixels.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

use crate::color_space::{parse_color, Rgb};
use crate::settings::{SettingKey, Settings};

/// Always ask the engine for the most robust code
pub const ERROR_CORRECTION: EcLevel = EcLevel::H;

/// Blank modules on each side when the margin is enabled
pub const QUIET_ZONE_MODULES: usize = 4;

/// Why the engine refused to produce a surface
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{field} colour '{value}' is not a hex colour")]
    InvalidColor { field: SettingKey, value: String },
    #[error("cannot encode text: {0}")]
    Encode(#[from] QrError),
    #[error("{modules} modules do not fit in {pixels}px, pick a larger density")]
    TooDense { modules: usize, pixels: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// A rendered code: the pixel image plus the module grid it came from
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    modules: Vec<bool>,
    module_count: usize,
    foreground: Rgb,
    background: Rgb,
}

impl RasterSurface {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Edge length in pixels
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Modules per side, quiet zone included
    pub fn module_count(&self) -> usize {
        self.module_count
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.module_count && y < self.module_count && self.modules[y * self.module_count + x]
    }

    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Encode the surface as PNG bytes
    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(self.image.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Render `text` with `settings`.
///
/// Empty text renders nothing and is not an error.
pub fn render(text: &str, settings: &Settings) -> Result<Option<RasterSurface>, RenderError> {
    if text.is_empty() {
        return Ok(None);
    }

    let foreground = resolve_color(SettingKey::Foreground, &settings.foreground)?;
    let background = resolve_color(SettingKey::Background, &settings.background)?;

    let code = QrCode::with_error_correction_level(text.as_bytes(), ERROR_CORRECTION)?;
    let (modules, module_count) = layout_modules(&code, settings.margin);

    let size = settings.density.pixels();
    // Every module needs at least one pixel or columns get dropped
    if module_count as u32 > size {
        return Err(RenderError::TooDense {
            modules: module_count,
            pixels: size,
        });
    }
    let image = rasterize(&modules, module_count, size, foreground, background);

    Ok(Some(RasterSurface {
        image,
        modules,
        module_count,
        foreground,
        background,
    }))
}

fn resolve_color(field: SettingKey, value: &str) -> Result<Rgb, RenderError> {
    parse_color(value).ok_or_else(|| RenderError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

/// Copy the engine's matrix into a grid, optionally padded with a quiet zone
fn layout_modules(code: &QrCode, margin: bool) -> (Vec<bool>, usize) {
    let width = code.width();
    let pad = if margin { QUIET_ZONE_MODULES } else { 0 };
    let total = width + 2 * pad;

    let mut grid = vec![false; total * total];
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let x = i % width + pad;
            let y = i / width + pad;
            grid[y * total + x] = true;
        }
    }

    (grid, total)
}

/// Paint a `size` x `size` image, mapping each pixel back to its module
fn rasterize(modules: &[bool], module_count: usize, size: u32, fg: Rgb, bg: Rgb) -> RgbaImage {
    let fg = Rgba([fg.r, fg.g, fg.b, 255]);
    let bg = Rgba([bg.r, bg.g, bg.b, 255]);
    let n = module_count as u64;
    let s = size as u64;

    RgbaImage::from_fn(size, size, |px, py| {
        let mx = (px as u64 * n / s) as usize;
        let my = (py as u64 * n / s) as usize;
        if modules[my * module_count + mx] {
            fg
        } else {
            bg
        }
    })
}
