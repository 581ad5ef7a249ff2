mod document_window;
mod search_bar;
mod search_options;
mod search_result_viewer;
mod status_bar;

pub use document_window::{DocumentWindow, DocumentWindowEvent, DocumentWindowProps};
pub use search_bar::{SearchBar, SearchBarEvent, SearchBarProps};
pub use search_options::{SearchOptions, SearchOptionsEvent, SearchOptionsProps};
pub use search_result_viewer::{
    SearchResultViewer, SearchResultViewerEvent, SearchResultViewerProps,
};
pub use status_bar::{StatusBar, StatusBarProps};

pub mod prelude {
    pub use super::{ContextComponent, StatefulComponent};
}

/// A component owning a whole panel or window of the viewport
pub trait ContextComponent {
    type Props<'a>;
    type Output;

    fn render(&mut self, ctx: &egui::Context, props: Self::Props<'_>) -> Self::Output;
}

/// A component drawn inside a `Ui` someone else laid out
pub trait StatefulComponent {
    type Props<'a>;
    type Output;

    fn render(&mut self, ui: &mut egui::Ui, props: Self::Props<'_>) -> Self::Output;
}

/// Buttons drawn as plain text until hovered
pub fn set_borderless_button_style(style: &mut egui::Style) {
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::NONE;
    style.visuals.widgets.inactive.weak_bg_fill = egui::Color32::TRANSPARENT;
    style.visuals.widgets.inactive.bg_fill = egui::Color32::TRANSPARENT;
}
