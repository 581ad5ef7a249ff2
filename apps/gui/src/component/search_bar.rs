use super::{ContextComponent, set_borderless_button_style};
use crate::constants;
use egui::{Align, Layout};
use egui_i18n::tr;

#[derive(Default)]
pub struct SearchBar {
    request_focus: bool,
}

pub struct SearchBarProps<'a> {
    /// Edited in place, owned by the controller
    pub query: &'a mut String,
    /// Most recent first
    pub history: &'a [String],
    pub is_loading: bool,
}

pub struct SearchBarOutput {
    pub events: Vec<SearchBarEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBarEvent {
    StartSearch,
    SelectHistory(String),
    Clear,
}

impl SearchBar {
    pub fn request_focus(&mut self) {
        self.request_focus = true;
    }

    fn render_history_menu(
        ui: &mut egui::Ui,
        history: &[String],
        events: &mut Vec<SearchBarEvent>,
    ) {
        ui.menu_button(tr!("history-button"), |ui| {
            if history.is_empty() {
                ui.label(tr!("history-empty"));
                return;
            }
            for entry in history {
                if ui.button(entry).clicked() {
                    events.push(SearchBarEvent::SelectHistory(entry.clone()));
                    ui.close();
                }
            }
        });
    }
}

fn setup_text_edit_style(style: &mut egui::Style) {
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::NONE;
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::NONE;
    style.visuals.text_cursor.stroke = egui::Stroke::new(2.0, style.visuals.text_color());
}

impl ContextComponent for SearchBar {
    type Props<'a> = SearchBarProps<'a>;
    type Output = SearchBarOutput;

    fn render(&mut self, ctx: &egui::Context, mut props: Self::Props<'_>) -> Self::Output {
        let mut events = vec![];

        egui::TopBottomPanel::top(constants::ID_PANEL_SEARCH_BAR)
            .show_separator_line(false)
            .frame(
                egui::Frame::NONE
                    .inner_margin(egui::vec2(10.0, 8.0))
                    .fill(ctx.style().visuals.panel_fill),
            )
            .show(ctx, |ui| {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.scope(|ui| {
                        set_borderless_button_style(ui.style_mut());
                        Self::render_history_menu(ui, props.history, &mut events);

                        if ui.button(tr!("clear-button")).clicked() {
                            events.push(SearchBarEvent::Clear);
                        }
                    });

                    let search_clicked = ui
                        .add_enabled(!props.is_loading, egui::Button::new(tr!("search-button")))
                        .clicked();

                    let output = ui
                        .scope(|ui| {
                            setup_text_edit_style(ui.style_mut());
                            egui::TextEdit::singleline(&mut *props.query)
                                .desired_width(ui.available_width())
                                .font(
                                    egui::TextStyle::Name(
                                        constants::TEXT_STYLE_SEARCH_BAR.into(),
                                    )
                                    .resolve(ui.style()),
                                )
                                .hint_text(tr!("search-bar-hint"))
                                .show(ui)
                        })
                        .inner;

                    let enter_pressed = output.response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    // Enter while a search runs is ignored like the disabled button
                    if (enter_pressed && !props.is_loading) || search_clicked {
                        events.push(SearchBarEvent::StartSearch);
                    }

                    if self.request_focus {
                        output.response.request_focus();
                        self.request_focus = false;
                    }
                });
            });

        SearchBarOutput { events }
    }
}
