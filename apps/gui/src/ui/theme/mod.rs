mod paper;

pub use paper::paper;

use api::ServiceStatus;
use egui::{
    Color32, Context, CornerRadius, Visuals,
    epaint::{Shadow, Stroke},
    style::{Selection, TextCursorStyle, WidgetVisuals, Widgets},
};
use result_view::DocKind;
use tracing::debug;

pub trait ColorPalette {
    fn is_dark(&self) -> bool;

    fn primary(&self) -> Color32;
    fn on_primary(&self) -> Color32;

    fn secondary(&self) -> Color32;

    fn surface(&self) -> Color32; // Main background
    fn on_surface(&self) -> Color32; // Main text

    fn surface_variant(&self) -> Color32; // Cards and inputs
    fn on_surface_variant(&self) -> Color32;

    fn error(&self) -> Color32;
    fn warning(&self) -> Color32;
    fn success(&self) -> Color32;
    fn outline(&self) -> Color32; // Borders
    fn hover(&self) -> Color32;
    fn shadow(&self) -> Color32;

    /// Background behind emphasized search terms
    fn mark(&self) -> Color32;
    fn on_mark(&self) -> Color32;
}

/// Colors the components draw with directly, outside of egui's visuals
#[derive(Debug, Clone, Copy)]
pub struct Accents {
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub unknown: Color32,
    pub mark: Color32,
    pub on_mark: Color32,
}

impl Accents {
    /// `None` while the first health check is still running
    pub fn status(&self, status: Option<ServiceStatus>) -> Color32 {
        match status {
            None => self.unknown,
            Some(ServiceStatus::Ok) => self.success,
            Some(ServiceStatus::Warning) => self.warning,
            Some(ServiceStatus::Error) => self.error,
        }
    }

    pub fn service(&self, up: Option<bool>) -> Color32 {
        match up {
            None => self.unknown,
            Some(true) => self.success,
            Some(false) => self.error,
        }
    }
}

pub fn doc_kind_color(kind: DocKind) -> Color32 {
    let [r, g, b] = kind.accent();
    Color32::from_rgb(r, g, b)
}

pub struct Theme {
    pub name: String,
    pub visuals: Visuals,
    pub accents: Accents,
}

fn widget(bg: Color32, stroke: Color32, fg: Color32, expansion: f32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::new(1.0, stroke),
        fg_stroke: Stroke::new(1.0, fg),
        corner_radius: CornerRadius::same(4),
        expansion,
    }
}

impl Theme {
    pub fn new(name: &str, palette: impl ColorPalette) -> Self {
        let visuals = Visuals {
            dark_mode: palette.is_dark(),
            override_text_color: Some(palette.on_surface()),
            window_fill: palette.surface(),
            panel_fill: palette.surface(),
            window_stroke: Stroke::new(1.0, palette.outline()),
            window_corner_radius: CornerRadius::same(6),
            window_shadow: Shadow {
                color: palette.shadow().gamma_multiply(0.5),
                offset: [6, 10],
                blur: 15,
                spread: 0,
            },
            popup_shadow: Shadow {
                color: palette.shadow().gamma_multiply(0.5),
                offset: [3, 6],
                blur: 8,
                spread: 0,
            },
            selection: Selection {
                bg_fill: palette.primary().gamma_multiply(0.3),
                stroke: Stroke::new(1.0, palette.primary()),
            },
            faint_bg_color: palette.surface_variant(),
            extreme_bg_color: palette.surface_variant(),
            text_edit_bg_color: Some(palette.surface_variant()),
            text_cursor: TextCursorStyle {
                stroke: Stroke::new(2.0, palette.primary()),
                ..Default::default()
            },
            hyperlink_color: palette.secondary(),
            warn_fg_color: palette.warning(),
            error_fg_color: palette.error(),
            code_bg_color: palette.surface_variant(),
            widgets: Widgets {
                noninteractive: widget(
                    palette.surface(),
                    palette.outline(),
                    palette.on_surface(),
                    0.0,
                ),
                inactive: widget(
                    palette.surface_variant(),
                    palette.outline(),
                    palette.on_surface_variant(),
                    0.0,
                ),
                hovered: widget(palette.hover(), palette.primary(), palette.on_surface(), 1.0),
                active: widget(palette.primary(), palette.primary(), palette.on_primary(), 1.0),
                open: widget(
                    palette.surface_variant(),
                    palette.outline(),
                    palette.on_surface(),
                    0.0,
                ),
            },
            ..if palette.is_dark() {
                Visuals::dark()
            } else {
                Visuals::light()
            }
        };

        let accents = Accents {
            success: palette.success(),
            warning: palette.warning(),
            error: palette.error(),
            unknown: palette.outline(),
            mark: palette.mark(),
            on_mark: palette.on_mark(),
        };

        Self {
            name: name.to_string(),
            visuals,
            accents,
        }
    }

    pub fn apply(&self, ctx: &Context) {
        debug!("Applying theme {}", self.name);
        ctx.set_visuals(self.visuals.clone());
    }
}
