use crate::text::display_text;
use regex::Regex;
use std::sync::LazyLock;

static SECTION_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^【.+】$").expect("section title pattern is valid"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-0-9.]\s").expect("list item pattern is valid"));

/// One line of a generated answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerLine {
    SectionTitle(String),
    ListItem(String),
    Paragraph(String),
}

/// Splits a generated answer into display lines. Blank lines are dropped.
pub fn parse_answer(answer: &str) -> Vec<AnswerLine> {
    display_text(answer)
        .lines()
        .filter_map(|line| {
            if SECTION_TITLE.is_match(line) {
                Some(AnswerLine::SectionTitle(line.to_string()))
            } else if LIST_ITEM.is_match(line) {
                Some(AnswerLine::ListItem(line.to_string()))
            } else if line.trim().is_empty() {
                None
            } else {
                Some(AnswerLine::Paragraph(line.to_string()))
            }
        })
        .collect()
}
