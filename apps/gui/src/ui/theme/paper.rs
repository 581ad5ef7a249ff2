use super::{ColorPalette, Theme};
use egui::Color32;

/// Light palette with a blue primary
struct Paper;

impl ColorPalette for Paper {
    fn is_dark(&self) -> bool { false }
    fn primary(&self) -> Color32 { Color32::from_rgb(0x25, 0x63, 0xeb) }
    fn on_primary(&self) -> Color32 { Color32::from_rgb(0xff, 0xff, 0xff) }
    fn secondary(&self) -> Color32 { Color32::from_rgb(0x1d, 0x4e, 0xd8) }
    fn surface(&self) -> Color32 { Color32::from_rgb(0xf8, 0xfa, 0xfc) }
    fn on_surface(&self) -> Color32 { Color32::from_rgb(0x1f, 0x29, 0x37) }
    fn surface_variant(&self) -> Color32 { Color32::from_rgb(0xff, 0xff, 0xff) }
    fn on_surface_variant(&self) -> Color32 { Color32::from_rgb(0x4b, 0x55, 0x63) }
    fn error(&self) -> Color32 { Color32::from_rgb(0xdc, 0x26, 0x26) }
    fn warning(&self) -> Color32 { Color32::from_rgb(0xd9, 0x77, 0x06) }
    fn success(&self) -> Color32 { Color32::from_rgb(0x16, 0xa3, 0x4a) }
    fn outline(&self) -> Color32 { Color32::from_rgb(0xd1, 0xd5, 0xdb) }
    fn hover(&self) -> Color32 { Color32::from_rgb(0xe0, 0xe7, 0xff) }
    fn shadow(&self) -> Color32 { Color32::from_rgb(0x94, 0xa3, 0xb8) }
    fn mark(&self) -> Color32 { Color32::from_rgb(0xfe, 0xf0, 0x8a) }
    fn on_mark(&self) -> Color32 { Color32::from_rgb(0x1f, 0x29, 0x37) }
}

pub fn paper() -> Theme {
    Theme::new("Paper", Paper)
}
