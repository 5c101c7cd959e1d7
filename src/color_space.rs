//! Colour parsing, contrast and terminal quantisation
//!
//! Settings carry colours as strings; this is where they become pixels.

use palette::{LinSrgb, Srgb};

use crate::terminal_capabilities::ColorSupport;

/// RGB color type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Rgb::new(c.red, c.green, c.blue)
    }
}

/// Parse `#rrggbb` / `#rgb` (leading `#` optional)
pub fn parse_color(s: &str) -> Option<Rgb> {
    s.trim().parse::<Srgb<u8>>().ok().map(Rgb::from)
}

/// WCAG relative luminance (0.0 to 1.0)
pub fn relative_luminance(rgb: Rgb) -> f32 {
    let linear: LinSrgb<f32> = Srgb::new(rgb.r, rgb.g, rgb.b)
        .into_format::<f32>()
        .into_linear();
    0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
}

/// WCAG contrast ratio, 1.0 (identical) to 21.0 (black on white)
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f32 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Below this ratio scanners start to struggle
pub const MIN_SCAN_CONTRAST: f32 = 3.0;

/// True when both colours parse and sit too close together to scan reliably.
/// Unparsable colours are the render pipeline's problem, not a contrast one.
pub fn is_low_contrast(foreground: &str, background: &str) -> bool {
    match (parse_color(foreground), parse_color(background)) {
        (Some(fg), Some(bg)) => contrast_ratio(fg, bg) < MIN_SCAN_CONTRAST,
        _ => false,
    }
}

/// Quantize RGB to ANSI 256-color palette
pub fn quantize_to_ansi256(rgb: Rgb) -> u8 {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;

    // Close to grey: use the 24-step ramp (232-255)
    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_diff = (r as i16 - avg as i16).abs().max(
        (g as i16 - avg as i16)
            .abs()
            .max((b as i16 - avg as i16).abs()),
    );

    if gray_diff < 10 {
        let gray_index = (avg as f32 / 255.0 * 23.0).round() as u8;
        return 232 + gray_index;
    }

    // 6x6x6 color cube (16-231)
    let r_index = (r as f32 / 255.0 * 5.0).round() as u8;
    let g_index = (g as f32 / 255.0 * 5.0).round() as u8;
    let b_index = (b as f32 / 255.0 * 5.0).round() as u8;

    16 + 36 * r_index + 6 * g_index + b_index
}

/// Map a colour onto what the terminal can show
pub fn to_terminal_color(rgb: Rgb, support: ColorSupport) -> ratatui::style::Color {
    use ratatui::style::Color;

    match support {
        ColorSupport::TrueColor => Color::Rgb(rgb.r, rgb.g, rgb.b),
        ColorSupport::Color256 => Color::Indexed(quantize_to_ansi256(rgb)),
        ColorSupport::Color16 | ColorSupport::NoColor => {
            if relative_luminance(rgb) > 0.5 {
                Color::White
            } else {
                Color::Black
            }
        }
    }
}
