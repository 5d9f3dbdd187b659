// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color parsing and WCAG contrast math.
//!
//! Only the syntaxes that inline styles commonly carry are understood:
//! a small named-color table, `#rgb` / `#rrggbb`, and `rgb(r, g, b)`.
//! Everything else (rgba, hsl, custom properties) parses to `None` and the
//! contrast check skips the element.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Minimum contrast for normal-size text at level AA
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// Named colors resolved to hex before parsing
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("silver", "#c0c0c0"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("purple", "#800080"),
    ("teal", "#008080"),
    ("aqua", "#00ffff"),
    ("fuchsia", "#ff00ff"),
    ("lime", "#00ff00"),
    ("orange", "#ffa500"),
];

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").expect("valid regex")
});

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
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

/// Parse a CSS color value.
///
/// An `rgb()` call is found anywhere in the value, so trailing tokens such
/// as `!important` are tolerated. Channel values above 255 are clamped.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let lowered = value.trim().to_ascii_lowercase();

    let resolved = NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, hex)| *hex)
        .unwrap_or(lowered.as_str());

    if let Some(hex) = resolved.strip_prefix('#') {
        return parse_hex(hex);
    }

    let caps = RGB_FUNCTION.captures(resolved)?;
    // Digit runs too long for u32 are out of range as well
    let channel = |i: usize| caps[i].parse::<u32>().map_or(255, |v| v.min(255)) as u8;
    Some(Rgb::new(channel(1), channel(2), channel(3)))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Rgb::new(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

/// Relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG22/#dfn-relative-luminance>
pub fn relative_luminance(color: Rgb) -> f64 {
    let linear = [color.r, color.g, color.b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * linear[0] + 0.7152 * linear[1] + 0.0722 * linear[2]
}

/// Contrast ratio between two colors, from 1.0 up to 21.0
pub fn contrast_ratio(fg: Rgb, bg: Rgb) -> f64 {
    let l1 = relative_luminance(fg);
    let l2 = relative_luminance(bg);
    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}
