use super::ContextComponent;
use crate::constants;
use api::SearchMode;
use controller::RESULT_COUNT_CHOICES;
use egui_i18n::tr;
use result_view::DocKind;
use strum::IntoEnumIterator;

/// Mode, result count, answer toggle and doc type filter, one row below the
/// search bar
#[derive(Default)]
pub struct SearchOptions;

pub struct SearchOptionsProps<'a> {
    pub mode: SearchMode,
    pub result_count: u32,
    pub use_generated_answer: bool,
    pub doc_type_filter: &'a [String],
    /// Options are locked while a search runs
    pub enabled: bool,
}

pub struct SearchOptionsOutput {
    pub events: Vec<SearchOptionsEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOptionsEvent {
    ChangeMode(SearchMode),
    ChangeResultCount(u32),
    SetGeneratedAnswer(bool),
    ToggleDocType(&'static str),
}

pub fn mode_label(mode: SearchMode) -> String {
    match mode {
        SearchMode::Hybrid => tr!("mode-hybrid"),
        SearchMode::Vector => tr!("mode-vector"),
        SearchMode::Keyword => tr!("mode-keyword"),
    }
}

impl SearchOptions {
    fn render_mode_selector(
        ui: &mut egui::Ui,
        current: SearchMode,
        events: &mut Vec<SearchOptionsEvent>,
    ) {
        ui.label(tr!("mode-label"));
        for mode in SearchMode::iter() {
            if ui.selectable_label(mode == current, mode_label(mode)).clicked() && mode != current {
                events.push(SearchOptionsEvent::ChangeMode(mode));
            }
        }
    }

    fn render_result_count(ui: &mut egui::Ui, current: u32, events: &mut Vec<SearchOptionsEvent>) {
        ui.label(tr!("result-count-label"));
        egui::ComboBox::from_id_salt(constants::ID_SALT_RESULT_COUNT)
            .selected_text(current.to_string())
            .width(48.0)
            .show_ui(ui, |ui| {
                for count in RESULT_COUNT_CHOICES {
                    if ui
                        .selectable_label(count == current, count.to_string())
                        .clicked()
                        && count != current
                    {
                        events.push(SearchOptionsEvent::ChangeResultCount(count));
                    }
                }
            });
    }

    fn render_doc_type_filter(
        ui: &mut egui::Ui,
        selected: &[String],
        events: &mut Vec<SearchOptionsEvent>,
    ) {
        ui.label(tr!("doc-type-label"));
        for kind in DocKind::FILTERABLE {
            let mut checked = selected.iter().any(|s| s == kind.tag());
            if ui.checkbox(&mut checked, kind.label()).changed() {
                events.push(SearchOptionsEvent::ToggleDocType(kind.tag()));
            }
        }
    }
}

impl ContextComponent for SearchOptions {
    type Props<'a> = SearchOptionsProps<'a>;
    type Output = SearchOptionsOutput;

    fn render(&mut self, ctx: &egui::Context, props: Self::Props<'_>) -> Self::Output {
        let mut events = vec![];

        egui::TopBottomPanel::top(constants::ID_PANEL_SEARCH_OPTIONS)
            .frame(
                egui::Frame::NONE
                    .inner_margin(egui::vec2(10.0, 4.0))
                    .fill(ctx.style().visuals.panel_fill),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(props.enabled, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        Self::render_mode_selector(ui, props.mode, &mut events);
                        ui.separator();
                        Self::render_result_count(ui, props.result_count, &mut events);
                        ui.separator();

                        let mut use_answer = props.use_generated_answer;
                        if ui.checkbox(&mut use_answer, tr!("use-answer")).changed() {
                            events.push(SearchOptionsEvent::SetGeneratedAnswer(use_answer));
                        }
                    });
                    ui.horizontal_wrapped(|ui| {
                        Self::render_doc_type_filter(ui, props.doc_type_filter, &mut events);
                    });
                });
            });

        SearchOptionsOutput { events }
    }
}
