//! `<em>` highlight markup as emitted by the search backend.

use crate::text::display_text;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const EM_OPEN: &str = "<em>";
const EM_CLOSE: &str = "</em>";
const ELLIPSIS: &str = "...";

pub const KEY_DESCRIPTION_TRUNCATE_CHARS: usize = 200;

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<em>(.*?)</em>").expect("emphasis pattern is valid"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("tag pattern is valid"));

/// A run of text, either plain or matched by the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Splits on `<em>…</em>`. Tags are dropped and empty runs are skipped. An
/// unterminated `<em>` is kept as literal text.
pub fn segments(text: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in EMPHASIS.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Segment::plain(&text[last..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            out.push(Segment::emphasized(inner.as_str()));
        }
        last = whole.end();
    }
    if last < text.len() {
        out.push(Segment::plain(&text[last..]));
    }

    out
}

/// Concatenated text of all segments, without markup
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Removes every tag except `<em>` and `</em>`
pub fn strip_foreign_tags(text: &str) -> String {
    TAG.replace_all(text, |caps: &Captures| match &caps[0] {
        EM_OPEN | EM_CLOSE => caps[0].to_string(),
        _ => String::new(),
    })
    .into_owned()
}

/// Cuts `text` after `max_chars` visible characters and appends `...`.
///
/// Only characters outside of tags count. Tags are never split, foreign tags
/// are removed. An emphasis left open by the cut is closed.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let clean = strip_foreign_tags(text);
    let mut out = String::with_capacity(clean.len().min(max_chars * 4 + 16));
    let mut visible = 0;
    let mut open = false;
    let mut rest = clean.as_str();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(EM_OPEN) {
            out.push_str(EM_OPEN);
            open = true;
            rest = after;
            continue;
        }
        if let Some(after) = rest.strip_prefix(EM_CLOSE) {
            out.push_str(EM_CLOSE);
            open = false;
            rest = after;
            continue;
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        if visible == max_chars {
            if open {
                match out.strip_suffix(EM_OPEN).map(str::len) {
                    Some(kept) => out.truncate(kept),
                    None => out.push_str(EM_CLOSE),
                }
            }
            out.push_str(ELLIPSIS);
            return out;
        }
        out.push(c);
        visible += 1;
        rest = chars.as_str();
    }

    out
}

/// Display pipeline for a fragment shown in full
pub fn rich_text(text: &str) -> Vec<Segment> {
    segments(&strip_foreign_tags(&display_text(text)))
}

/// Display pipeline for a fragment shown as a preview
pub fn preview_text(text: &str, max_chars: usize) -> Vec<Segment> {
    segments(&truncate(&display_text(text), max_chars))
}
