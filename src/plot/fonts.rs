//! Runtime font registration for chart text
//!
//! plotters draws text through `ab_glyph`, which needs a font registered at
//! runtime. The first readable font from a list of common system locations is
//! registered once per process. Without one, charts are drawn without text.

use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

/// Family name every chart uses for its text
pub const FONT_FAMILY: &str = "sans-serif";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static TEXT_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Whether a font is registered and chart text can be drawn
pub fn text_available() -> bool {
    *TEXT_AVAILABLE.get_or_init(register_system_font)
}

fn register_system_font() -> bool {
    for candidate in FONT_CANDIDATES {
        let Ok(bytes) = std::fs::read(candidate) else {
            continue;
        };
        // Registered fonts must live for the rest of the process
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        if register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok() {
            return true;
        }
    }
    false
}
