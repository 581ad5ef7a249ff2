//! Presentation of a single hit.

use crate::doc_type::DocKind;
use crate::highlight::{self, KEY_DESCRIPTION_TRUNCATE_CHARS, Segment};
use crate::text::display_text;
use api::SourceDocument;
use api::model::{PREVIEW_FIELD, SNIPPETS_FIELD};

const UNNAMED: &str = "未命名";
const ID_PREFIX_CHARS: usize = 8;

/// File name without its extension. Suffixes that are not an extension
/// (digits only, spaces, too long) are kept.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && !ext.chars().all(|c| c.is_ascii_digit()) =>
        {
            stem
        }
        _ => file_name,
    }
}

/// Human readable name, from the most to the least descriptive field
pub fn display_name(doc: &SourceDocument) -> String {
    if !doc.file_name.is_empty() {
        return strip_extension(&doc.file_name).to_string();
    }
    if !doc.title.is_empty() {
        return doc.title.clone();
    }
    match (doc.number.is_empty(), doc.doc_type.is_empty()) {
        (false, false) => return format!("{} - {}", doc.doc_type, doc.number),
        (false, true) => return format!("文件編號: {}", doc.number),
        _ => {}
    }

    let id: String = doc.id.chars().take(ID_PREFIX_CHARS).collect();
    let id = if id.is_empty() { UNNAMED.to_string() } else { id };
    format!("{} - {}", DocKind::from_doc_type(&doc.doc_type).label(), id)
}

/// Type specific content field, chosen by the name of the source index
fn type_specific_content(doc: &SourceDocument) -> &str {
    let index = doc.source_index.as_str();
    if index.contains("complaint") {
        &doc.complaint_description
    } else if index.contains("ecn") {
        &doc.change_description
    } else if index.contains("fmea") {
        &doc.failure_mode
    } else {
        ""
    }
}

/// The one fragment shown while a card is collapsed. Keeps the raw markup.
pub fn key_description(doc: &SourceDocument) -> &str {
    if let Some(preview) = doc.highlights.first_fragment(PREVIEW_FIELD) {
        return preview;
    }
    if let Some(field) = doc
        .highlights
        .first_non_empty(&[PREVIEW_FIELD, SNIPPETS_FIELD])
    {
        return &field.fragments[0];
    }

    let specific = type_specific_content(doc);
    if !specific.is_empty() {
        return specific;
    }
    &doc.summary
}

pub fn header_parts(doc: &SourceDocument) -> Vec<String> {
    let name = display_name(doc);
    let mut parts = Vec::with_capacity(4);

    let show_number = !doc.number.is_empty() && !name.contains(&doc.number);
    parts.push(name);
    if show_number {
        parts.push(format!("編號: {}", doc.number));
    }
    if !doc.department.is_empty() {
        parts.push(format!("部門: {}", doc.department));
    }
    if !doc.date.is_empty() {
        parts.push(format!("日期: {}", doc.date));
    }

    parts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailItem {
    pub label: Option<&'static str>,
    pub value: String,
}

impl DetailItem {
    fn labeled(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label: Some(label),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailGroup {
    pub title: &'static str,
    pub items: Vec<DetailItem>,
}

/// Groups for the expanded view. Groups without items are left out.
pub fn detail_groups(doc: &SourceDocument) -> Vec<DetailGroup> {
    let basic = [
        ("文件類型", &doc.doc_type),
        ("文件日期", &doc.date),
        ("部門", &doc.department),
        ("申請人", &doc.applicant),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| DetailItem::labeled(label, value.as_str()))
    .collect();

    let mut groups = vec![DetailGroup {
        title: "基本資訊",
        items: basic,
    }];

    if !doc.product_codes.is_empty() {
        groups.push(DetailGroup {
            title: "產品資訊",
            items: vec![DetailItem::labeled("產品編號", doc.product_codes.join(", "))],
        });
    }
    if !doc.keywords.is_empty() {
        groups.push(DetailGroup {
            title: "關鍵字",
            items: vec![DetailItem {
                label: None,
                value: doc.keywords.join(", "),
            }],
        });
    }

    groups.retain(|g| !g.items.is_empty());
    groups
}

pub fn score_text(score: f64) -> String {
    format!("相關度: {score:.3}")
}

/// Everything the result list needs to draw one hit, already converted for
/// display. Built once per response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub kind: DocKind,
    pub header: Vec<String>,
    pub score: String,
    pub preview: Vec<Segment>,
    /// Full summary, only when it differs from the preview source
    pub summary: Option<Vec<Segment>>,
    pub details: Vec<DetailGroup>,
    pub snippets: Vec<Vec<Segment>>,
    pub download_url: Option<String>,
    pub document_id: String,
}

impl ResultCard {
    pub fn new(doc: &SourceDocument) -> Self {
        let key = key_description(doc);

        let summary = (!doc.summary.is_empty() && doc.summary != key)
            .then(|| highlight::rich_text(&doc.summary));

        let details = detail_groups(doc)
            .into_iter()
            .map(|mut group| {
                for item in &mut group.items {
                    item.value = display_text(&item.value);
                }
                group
            })
            .collect();

        let snippets = doc
            .highlights
            .get(SNIPPETS_FIELD)
            .unwrap_or_default()
            .iter()
            .map(|s| highlight::rich_text(s))
            .collect();

        Self {
            kind: DocKind::from_doc_type(&doc.doc_type),
            header: header_parts(doc).iter().map(|p| display_text(p)).collect(),
            score: score_text(doc.score),
            preview: highlight::preview_text(key, KEY_DESCRIPTION_TRUNCATE_CHARS),
            summary,
            details,
            snippets,
            download_url: (!doc.file_url.is_empty()).then(|| doc.file_url.clone()),
            document_id: doc.id.clone(),
        }
    }
}
