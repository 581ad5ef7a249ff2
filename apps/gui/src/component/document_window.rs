use super::ContextComponent;
use crate::constants;
use api::normalize::map_document;
use controller::{DocumentLookup, Lookup, RelatedLookup};
use egui::{RichText, Ui};
use egui_i18n::tr;
use result_view::card::display_name;
use result_view::text::display_text;
use serde_json::Value;

/// Floating window with one document fetched on demand and, once asked for,
/// the documents related to it
#[derive(Default)]
pub struct DocumentWindow;

pub struct DocumentWindowProps<'a> {
    pub document: &'a DocumentLookup,
    pub related: Option<&'a RelatedLookup>,
}

pub struct DocumentWindowOutput {
    pub events: Vec<DocumentWindowEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentWindowEvent {
    Close,
    LoadRelated(Vec<String>),
    ShowDocument(String),
}

/// Scalar fields as text, nested values as compact JSON
fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => display_text(s),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Fields worth a row, in backend order
fn document_fields(document: &Value) -> Vec<(&str, String)> {
    let Some(fields) = document.as_object() else {
        return vec![("", field_text(document))];
    };
    fields
        .iter()
        .map(|(key, value)| (key.as_str(), field_text(value)))
        .filter(|(_, text)| !text.is_empty())
        .collect()
}

impl DocumentWindow {
    fn render_fields(ui: &mut Ui, document: &Value) {
        egui::Grid::new(constants::ID_SALT_DOCUMENT_FIELDS)
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for (key, text) in document_fields(document) {
                    ui.label(RichText::new(key).strong());
                    ui.add(egui::Label::new(text).wrap());
                    ui.end_row();
                }
            });
    }

    fn render_related(
        ui: &mut Ui,
        ids: &[String],
        related: Option<&RelatedLookup>,
        events: &mut Vec<DocumentWindowEvent>,
    ) {
        ui.separator();
        ui.label(RichText::new(tr!("related-title")).strong());

        match related.filter(|lookup| lookup.key().as_slice() == ids) {
            None => {
                ui.horizontal_wrapped(|ui| {
                    ui.weak(ids.join(", "));
                });
                if ui.button(tr!("related-load")).clicked() {
                    events.push(DocumentWindowEvent::LoadRelated(ids.to_vec()));
                }
            }
            Some(Lookup::Loading(_)) => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label(tr!("loading"));
                });
            }
            Some(Lookup::Failed(_, message)) => {
                ui.colored_label(ui.visuals().error_fg_color, message);
            }
            Some(Lookup::Loaded(_, documents)) => {
                if documents.is_empty() {
                    ui.weak(tr!("related-empty"));
                }
                for raw in documents {
                    let doc = map_document(raw);
                    let name = display_name(&doc);
                    if doc.id.is_empty() {
                        ui.label(name);
                    } else if ui.link(name).clicked() {
                        events.push(DocumentWindowEvent::ShowDocument(doc.id.clone()));
                    }
                }
            }
        }
    }
}

impl ContextComponent for DocumentWindow {
    type Props<'a> = DocumentWindowProps<'a>;
    type Output = DocumentWindowOutput;

    fn render(&mut self, ctx: &egui::Context, props: Self::Props<'_>) -> Self::Output {
        let mut events = vec![];
        let mut open = true;

        egui::Window::new(format!("{}: {}", tr!("document-detail"), props.document.key()))
            .id(egui::Id::new(constants::ID_SALT_DOCUMENT_FIELDS).with("window"))
            .open(&mut open)
            .default_width(520.0)
            .vscroll(true)
            .show(ctx, |ui| match props.document {
                Lookup::Loading(_) => {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label(tr!("loading"));
                    });
                }
                Lookup::Failed(_, message) => {
                    ui.colored_label(ui.visuals().error_fg_color, message);
                }
                Lookup::Loaded(_, detail) => match detail.document() {
                    Some(document) => {
                        Self::render_fields(ui, document);
                        let related = detail.related_documents();
                        if !related.is_empty() {
                            Self::render_related(ui, related, props.related, &mut events);
                        }
                    }
                    None => {
                        ui.label(tr!("document-not-found"));
                        ui.add_space(4.0);
                        ui.monospace(detail_payload(detail));
                    }
                },
            });

        if !open {
            events.push(DocumentWindowEvent::Close);
        }

        DocumentWindowOutput { events }
    }
}

fn detail_payload(detail: &api::DocumentDetail) -> String {
    match detail {
        api::DocumentDetail::Raw(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        api::DocumentDetail::Found { document, .. } => document.to_string(),
    }
}
