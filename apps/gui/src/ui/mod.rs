mod config;
mod font;
mod theme;

pub use self::config::UiConfig;
pub use font::setup_fonts;
pub use theme::*;

use crate::constants;
use egui::{FontId, TextStyle};
use std::collections::BTreeMap;

/// Installs fonts, text sizes and the theme. Returns the accents components
/// paint with.
pub fn setup_ui(ctx: &egui::Context, cfg: &UiConfig) -> Accents {
    setup_fonts(ctx, cfg.font_path.as_deref());

    // UI Scale
    if let Some(scale) = cfg.scale {
        ctx.set_pixels_per_point(scale);
    }

    let theme = paper();
    theme.apply(ctx);

    let mut style = (*ctx.style()).clone();

    // Font Size
    let font_size = cfg.font_size;
    let text_styles: BTreeMap<_, _> = [
        (TextStyle::Small, FontId::proportional(font_size * 0.85)),
        (TextStyle::Body, FontId::proportional(font_size)),
        (TextStyle::Heading, FontId::proportional(font_size * 1.25)),
        (TextStyle::Monospace, FontId::monospace(font_size)),
        (TextStyle::Button, FontId::proportional(font_size)),
        (
            TextStyle::Name(constants::TEXT_STYLE_SEARCH_BAR.into()),
            FontId::proportional(font_size * 1.2),
        ),
        (
            TextStyle::Name(constants::TEXT_STYLE_STATUS_BAR.into()),
            FontId::proportional(font_size * 0.85),
        ),
    ]
    .into();
    style.text_styles = text_styles;

    ctx.set_style(style);

    theme.accents
}
