use crate::ui::Accents;
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};
use result_view::Segment;

/// Builds a single wrapped layout from highlight segments, emphasized runs
/// painted on the mark color
pub fn highlight_job(
    segments: &[Segment],
    font_id: FontId,
    color: Color32,
    accents: &Accents,
    wrap_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    for segment in segments {
        let format = if segment.emphasized {
            TextFormat {
                font_id: font_id.clone(),
                color: accents.on_mark,
                background: accents.mark,
                ..Default::default()
            }
        } else {
            TextFormat::simple(font_id.clone(), color)
        };
        job.append(&segment.text, 0.0, format);
    }

    job
}
