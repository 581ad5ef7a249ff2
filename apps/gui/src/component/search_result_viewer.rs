use super::{StatefulComponent, set_borderless_button_style};
use crate::ui::{Accents, doc_kind_color};
use crate::util::highlight_job;
use controller::SearchResults;
use egui::{Align, Color32, Layout, RichText, Stroke, TextStyle, Ui};
use egui_i18n::tr;
use result_view::view::{
    NO_RESULTS_HINT, NO_RESULTS_HISTORY_HINT, NO_RESULTS_SUGGESTIONS, NO_RESULTS_TITLE,
    recent_suggestions,
};
use result_view::{AnswerLine, ExpandState, ResultCard, ResultsView, Segment};

/// Draws the current result set. Keeps the prepared view and the expand state
/// of the cards between frames, both reset when a new result set arrives.
#[derive(Default)]
pub struct SearchResultViewer {
    seq: Option<u64>,
    view: Option<ResultsView>,
    expand: ExpandState,
}

pub struct SearchResultViewerProps<'a> {
    pub results: Option<&'a SearchResults>,
    pub history: &'a [String],
    pub error: Option<&'a str>,
    /// Loading message while a search runs
    pub activity: Option<String>,
    pub accents: &'a Accents,
}

pub struct SearchResultViewerOutput {
    pub events: Vec<SearchResultViewerEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResultViewerEvent {
    DismissError,
    /// A suggestion from the no results view was clicked
    SearchAgain(String),
    Download(String),
    ShowDocument(String),
}

impl SearchResultViewer {
    /// Rebuilds the prepared view when the result set changed
    fn sync(&mut self, results: Option<&SearchResults>) {
        let seq = results.map(|r| r.seq);
        if seq == self.seq {
            return;
        }

        self.seq = seq;
        self.expand.reset();
        self.view = results.map(|r| ResultsView::new(&r.response, r.query.use_generated_answer));
    }

    fn render_error(ui: &mut Ui, error: &str, events: &mut Vec<SearchResultViewerEvent>) {
        let color = ui.visuals().error_fg_color;
        egui::Frame::NONE
            .fill(color.gamma_multiply(0.08))
            .stroke(Stroke::new(1.0, color))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(egui::vec2(10.0, 6.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("⚠ {error}")).color(color));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        set_borderless_button_style(ui.style_mut());
                        if ui
                            .button("✕")
                            .on_hover_text(tr!("dismiss-error"))
                            .clicked()
                        {
                            events.push(SearchResultViewerEvent::DismissError);
                        }
                    });
                });
            });
        ui.add_space(6.0);
    }

    fn render_header(ui: &mut Ui, view: &ResultsView) {
        ui.horizontal_wrapped(|ui| {
            ui.heading(tr!("results-title"));
            ui.label(RichText::new(&view.header.count).strong());
            ui.weak(&view.header.mode);
            ui.weak(&view.header.elapsed);
        });
    }

    fn render_answer(ui: &mut Ui, answer: &[AnswerLine]) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(tr!("answer-title")).strong());
            ui.add_space(4.0);
            for line in answer {
                match line {
                    AnswerLine::SectionTitle(title) => {
                        ui.add_space(4.0);
                        ui.label(RichText::new(title).strong());
                    }
                    AnswerLine::ListItem(item) => {
                        ui.horizontal_wrapped(|ui| {
                            ui.add_space(12.0);
                            ui.label(item);
                        });
                    }
                    AnswerLine::Paragraph(text) => {
                        ui.label(text);
                    }
                }
            }
        });
    }

    fn render_no_results(
        ui: &mut Ui,
        history: &[String],
        events: &mut Vec<SearchResultViewerEvent>,
    ) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading(NO_RESULTS_TITLE);
        });
        ui.add_space(8.0);
        ui.label(NO_RESULTS_HINT);
        for suggestion in NO_RESULTS_SUGGESTIONS {
            ui.label(format!("• {suggestion}"));
        }

        let recent = recent_suggestions(history);
        if recent.is_empty() {
            return;
        }
        ui.add_space(8.0);
        ui.label(NO_RESULTS_HISTORY_HINT);
        ui.horizontal_wrapped(|ui| {
            for query in recent {
                if ui.button(query).clicked() {
                    events.push(SearchResultViewerEvent::SearchAgain(query.clone()));
                }
            }
        });
    }

    fn render_segments(ui: &mut Ui, segments: &[Segment], accents: &Accents) {
        let font_id = TextStyle::Body.resolve(ui.style());
        let color = ui.visuals().text_color();
        let job = highlight_job(segments, font_id, color, accents, ui.available_width());
        ui.label(job);
    }

    fn render_card_title(
        ui: &mut Ui,
        index: usize,
        card: &ResultCard,
        expanded: bool,
        events: &mut Vec<SearchResultViewerEvent>,
    ) -> bool {
        let accent = doc_kind_color(card.kind);
        let mut toggled = false;

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("#{}", index + 1)).weak());
            egui::Frame::NONE
                .fill(accent.gamma_multiply(0.15))
                .corner_radius(egui::CornerRadius::same(3))
                .inner_margin(egui::vec2(6.0, 1.0))
                .show(ui, |ui| {
                    ui.label(RichText::new(card.kind.label()).color(accent).small());
                });
            ui.label(RichText::new(card.header.join(" | ")).strong());

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                set_borderless_button_style(ui.style_mut());
                let toggle_text = if expanded {
                    tr!("collapse")
                } else {
                    tr!("expand")
                };
                if ui.button(toggle_text).clicked() {
                    toggled = true;
                }
                if let Some(url) = &card.download_url
                    && ui.button(tr!("download")).on_hover_text(url).clicked()
                {
                    events.push(SearchResultViewerEvent::Download(url.clone()));
                }
                if !card.document_id.is_empty() && ui.button(tr!("details")).clicked() {
                    events.push(SearchResultViewerEvent::ShowDocument(
                        card.document_id.clone(),
                    ));
                }
                ui.weak(&card.score);
            });
        });

        toggled
    }

    fn render_card_body(ui: &mut Ui, card: &ResultCard, accents: &Accents) {
        if let Some(summary) = &card.summary {
            ui.label(RichText::new(tr!("summary-title")).strong());
            Self::render_segments(ui, summary, accents);
            ui.add_space(4.0);
        }

        for group in &card.details {
            ui.label(RichText::new(group.title).strong());
            for item in &group.items {
                match item.label {
                    Some(label) => ui.label(format!("{label}: {}", item.value)),
                    None => ui.label(&item.value),
                };
            }
            ui.add_space(4.0);
        }

        if !card.snippets.is_empty() {
            ui.label(RichText::new(tr!("snippets-title")).strong());
            for (i, snippet) in card.snippets.iter().enumerate() {
                ui.horizontal_wrapped(|ui| {
                    ui.weak(format!("{} {}", tr!("snippet-label"), i + 1));
                    Self::render_segments(ui, snippet, accents);
                });
            }
        }
    }

    /// The key description preview only stands in for the collapsed body
    fn shows_preview(card: &ResultCard, expanded: bool) -> bool {
        !expanded && !card.preview.is_empty()
    }

    fn render_card(
        ui: &mut Ui,
        index: usize,
        card: &ResultCard,
        expand: &mut ExpandState,
        accents: &Accents,
        events: &mut Vec<SearchResultViewerEvent>,
    ) {
        let accent = doc_kind_color(card.kind);
        let expanded = expand.is_expanded(index);

        egui::Frame::NONE
            .fill(ui.visuals().extreme_bg_color)
            .stroke(Stroke::new(1.0, accent.gamma_multiply(0.6)))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::vec2(10.0, 8.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                if Self::render_card_title(ui, index, card, expanded, events) {
                    expand.toggle(index);
                }

                if Self::shows_preview(card, expanded) {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(tr!("preview-label")).color(Color32::GRAY));
                        Self::render_segments(ui, &card.preview, accents);
                    });
                }

                if expanded {
                    ui.separator();
                    Self::render_card_body(ui, card, accents);
                }
            });
        ui.add_space(6.0);
    }
}

impl StatefulComponent for SearchResultViewer {
    type Props<'a> = SearchResultViewerProps<'a>;
    type Output = SearchResultViewerOutput;

    fn render(&mut self, ui: &mut Ui, props: Self::Props<'_>) -> Self::Output {
        let mut events = vec![];
        self.sync(props.results);

        if let Some(error) = props.error {
            Self::render_error(ui, error, &mut events);
        }

        if let Some(activity) = props.activity {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(activity);
            });
            ui.add_space(6.0);
        }

        let Some(view) = &self.view else {
            return SearchResultViewerOutput { events };
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::render_header(ui, view);
                ui.add_space(6.0);

                if !view.answer.is_empty() {
                    Self::render_answer(ui, &view.answer);
                    ui.add_space(6.0);
                }

                if view.is_empty() {
                    Self::render_no_results(ui, props.history, &mut events);
                    return;
                }

                ui.label(RichText::new(tr!("documents-title")).strong());
                ui.add_space(4.0);
                for (index, card) in view.cards.iter().enumerate() {
                    Self::render_card(ui, index, card, &mut self.expand, props.accents, &mut events);
                }
            });

        SearchResultViewerOutput { events }
    }
}
